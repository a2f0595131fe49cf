use super::*;

#[test]
fn font_size_parsing_falls_back() {
    assert_eq!(parse_font_size("72"), 72.0);
    assert_eq!(parse_font_size(" 96.5 "), 96.5);
    assert_eq!(parse_font_size(""), DEFAULT_FONT_SIZE_PX);
    assert_eq!(parse_font_size("abc"), 140.0);
    assert_eq!(parse_font_size("-3"), 140.0);
    assert_eq!(parse_font_size("0"), 140.0);
    assert_eq!(parse_font_size("inf"), 140.0);
    assert_eq!(parse_font_size("NaN"), 140.0);
}

#[test]
fn font_size_is_capped() {
    assert_eq!(parse_font_size("1e30"), MAX_FONT_SIZE_PX);
    assert_eq!(parse_font_size("20000"), MAX_FONT_SIZE_PX);
    assert_eq!(parse_font_size("1024"), 1024.0);

    let cfg = RenderConfig {
        font_size_px: f32::MAX,
        ..RenderConfig::default()
    };
    assert_eq!(cfg.effective_font_size(), MAX_FONT_SIZE_PX);
}

#[test]
fn empty_text_uses_sample() {
    let mut cfg = RenderConfig::default();
    assert_eq!(cfg.effective_text(), DEFAULT_SAMPLE_TEXT);
    cfg.text = "  ".to_owned();
    assert_eq!(cfg.effective_text(), "النص التجريبي");
    cfg.text = "AB".to_owned();
    assert_eq!(cfg.effective_text(), "AB");
}

#[test]
fn image_mode_needs_an_image() {
    let mut cfg = RenderConfig {
        mode: RenderMode::Image,
        ..RenderConfig::default()
    };
    assert_eq!(cfg.effective_mode(), RenderMode::Text);
    cfg.source_image = Some(Arc::new(DecodedImage::from_rgba(image::RgbaImage::new(2, 2))));
    assert_eq!(cfg.effective_mode(), RenderMode::Image);
}

#[test]
fn bad_font_size_in_config_is_replaced() {
    let cfg = RenderConfig {
        font_size_px: f32::NAN,
        ..RenderConfig::default()
    };
    assert_eq!(cfg.effective_font_size(), DEFAULT_FONT_SIZE_PX);
}

#[test]
fn params_default_and_partial_json() {
    let p = EffectParams::default();
    assert!(p.validate().is_ok());
    assert_eq!(p.bevel.size_ratio, 0.04);
    assert_eq!(p.specular.text.soft_passes, 6);

    let json = r##"{ "bevel": { "min_size_px": 2.0, "shadow": { "color": "#102030", "alpha": 0.3, "offset": [1.0, 1.0] } }, "image_box_ratio": 0.5 }"##;
    let p = EffectParams::from_reader(json.as_bytes()).unwrap();
    assert_eq!(p.bevel.min_size_px, 2.0);
    assert_eq!(p.bevel.blur_ratio, 1.8);
    assert_eq!(p.bevel.shadow.color.to_hex(), "#102030");
    assert_eq!(p.image_box_ratio, 0.5);
    assert_eq!(p.text_ramp, RampAmounts::TEXT);
}

#[test]
fn params_reject_unknown_fields_and_bad_values() {
    assert!(EffectParams::from_reader(r#"{ "bevle": {} }"#.as_bytes()).is_err());
    assert!(EffectParams::from_reader(r#"{ "image_box_ratio": 0 }"#.as_bytes()).is_err());
    assert!(matches!(
        EffectParams::from_reader(r#"not json"#.as_bytes()),
        Err(GlazeError::Serde(_))
    ));
}

#[test]
fn params_serialize_back_to_json() {
    let json = serde_json::to_string(&EffectParams::default()).unwrap();
    let back: EffectParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, EffectParams::default());
}

#[test]
fn params_from_missing_path_is_validation_error() {
    let err = EffectParams::from_path("/nonexistent/glaze/params.json").unwrap_err();
    assert!(matches!(err, GlazeError::Validation(_)));
}
