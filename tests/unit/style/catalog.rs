use super::*;

fn style(json: &str) -> Style {
    serde_json::from_str(json).unwrap()
}

#[test]
fn avg_color_wins() {
    let s = style(r##"{ "name": "a", "avg_color": { "hex": "#112233" }, "candidates": [{ "hex": "#445566" }] }"##);
    assert_eq!(resolve_hex(&s, ColorSite::Preview), "#112233");
}

#[test]
fn first_candidate_when_no_average() {
    let s = style(r##"{ "avg_color": { "hex": "" }, "candidates": [{ "hex": "#445566" }, { "hex": "#000000" }] }"##);
    assert_eq!(resolve_hex(&s, ColorSite::Preview), "#445566");
}

#[test]
fn null_and_empty_fall_back_per_site() {
    let s = style(r#"{ "avg_color": null, "candidates": [] }"#);
    assert_eq!(resolve_hex(&s, ColorSite::CatalogThumbnail), "#7ab7ff");
    assert_eq!(resolve_hex(&s, ColorSite::Preview), "#4fb3ff");
    assert_eq!(resolve_hex(&s, ColorSite::GridThumbnail), "#3aa0ff");
    assert_eq!(resolve_color(&s, ColorSite::Preview), Color::rgb(0x4f, 0xb3, 0xff));

    let bare = Style::default();
    assert_eq!(resolve_hex(&bare, ColorSite::Preview), "#4fb3ff");

    let empty_candidate = style(r##"{ "candidates": [{ "hex": "" }, { "hex": "#010203" }] }"##);
    assert_eq!(resolve_hex(&empty_candidate, ColorSite::GridThumbnail), "#3aa0ff");
}

#[test]
fn resolved_hex_is_verbatim() {
    let s = style(r#"{ "avg_color": { "hex": "ABCDEF" } }"#);
    assert_eq!(resolve_hex(&s, ColorSite::Preview), "ABCDEF");
    assert_eq!(resolve_color(&s, ColorSite::Preview), Color::rgb(0xab, 0xcd, 0xef));
}

#[test]
fn unparseable_hex_renders_with_fallback() {
    let s = style(r#"{ "avg_color": { "hex": "teal-ish" } }"#);
    assert_eq!(resolve_hex(&s, ColorSite::Preview), "teal-ish");
    assert_eq!(resolve_color(&s, ColorSite::GridThumbnail), ColorSite::GridThumbnail.fallback());
}

#[test]
fn fallback_hex_matches_fallback_color() {
    for site in [ColorSite::CatalogThumbnail, ColorSite::Preview, ColorSite::GridThumbnail] {
        assert_eq!(Color::from_hex(site.fallback_hex()).unwrap(), site.fallback());
    }
}

#[test]
fn labels_fall_through() {
    assert_eq!(style(r#"{ "name": "Gold", "id": "g1" }"#).label(), "Gold");
    assert_eq!(style(r#"{ "name": "", "id": 17 }"#).label(), "17");
    assert_eq!(style(r#"{ "file": "gold.asl" }"#).label(), "gold.asl");
    assert_eq!(style("{}").label(), "unnamed");
}

#[test]
fn catalog_parsing() {
    let c = Catalog::from_json_str(r##"{ "styles": [ { "name": "x", "avg_color": { "hex": "#fff" }, "extra": 1 } ], "meta": {} }"##).unwrap();
    assert_eq!(c.len(), 1);
    assert!(Catalog::from_json_str("{}").unwrap().is_empty());
    assert!(Catalog::from_json_str(r#"{ "styles": null }"#).unwrap().is_empty());

    let err = Catalog::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, GlazeError::CatalogParse(_)));
    assert_eq!(err.status_message(), "failed to read catalog JSON");
}

#[test]
fn find_by_label_or_index() {
    let c = Catalog::from_json_str(r#"{ "styles": [ { "name": "Gold" }, { "id": "chrome" } ] }"#).unwrap();
    assert_eq!(c.find("Gold").map(|(i, _)| i), Some(0));
    assert_eq!(c.find("CHROME").map(|(i, _)| i), Some(1));
    assert_eq!(c.find("1").map(|(i, _)| i), Some(1));
    assert!(c.find("2").is_none());
    assert!(c.find("silver").is_none());
}

#[test]
fn default_catalog_missing_is_fetch_error() {
    let err = Catalog::fetch_default("/nonexistent/glaze").unwrap_err();
    assert!(matches!(err, GlazeError::CatalogFetch(_)));
    assert_eq!(err.status_message(), "no default catalog available");
}

#[test]
fn default_catalog_from_directory() {
    let dir = std::env::temp_dir().join(format!("glaze-catalog-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(DEFAULT_CATALOG_FILE),
        r##"{ "styles": [ { "name": "one", "candidates": [ { "hex": "#123456" } ] } ] }"##,
    )
    .unwrap();
    let c = Catalog::fetch_default(&dir).unwrap();
    assert_eq!(resolve_hex(&c.styles[0], ColorSite::Preview), "#123456");

    std::fs::write(dir.join(DEFAULT_CATALOG_FILE), "garbage").unwrap();
    let err = Catalog::fetch_default(&dir).unwrap_err();
    assert!(matches!(err, GlazeError::CatalogFetch(_)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oddly_typed_fields_do_not_reject_the_catalog() {
    let c = Catalog::from_json_str(
        r##"{ "styles": [
            { "name": "ok", "avg_color": { "hex": "#112233" } },
            { "name": "str", "avg_color": "#ff0000", "candidates": [{ "hex": "#00ff00" }] },
            { "name": "num", "avg_color": { "hex": 123 }, "candidates": ["#abcdef", { "hex": "#010101" }] },
            { "name": "list", "candidates": { "hex": "#222222" } },
            7
        ] }"##,
    )
    .unwrap();
    assert_eq!(c.len(), 5);

    assert_eq!(resolve_hex(&c.styles[0], ColorSite::Preview), "#112233");
    assert_eq!(resolve_hex(&c.styles[1], ColorSite::Preview), "#00ff00");
    assert_eq!(c.styles[2].avg_color, Some(HexRef { hex: None }));
    assert_eq!(resolve_hex(&c.styles[2], ColorSite::Preview), "#4fb3ff");
    assert_eq!(c.styles[3].candidates, None);
    assert_eq!(resolve_hex(&c.styles[3], ColorSite::GridThumbnail), "#3aa0ff");
    assert_eq!(c.styles[4], Style::default());
}

#[test]
fn numeric_name_is_kept_as_text() {
    let s = style(r#"{ "name": 42, "file": 9 }"#);
    assert_eq!(s.name.as_deref(), Some("42"));
    assert_eq!(s.file, None);
    assert_eq!(s.label(), "42");
}

#[test]
fn malformed_json_is_still_a_parse_error() {
    assert!(matches!(
        Catalog::from_json_str("{ \"styles\": [ { "),
        Err(GlazeError::CatalogParse(_))
    ));
    assert!(matches!(
        Catalog::from_json_str(r#"{ "styles": "none" }"#),
        Err(GlazeError::CatalogParse(_))
    ));
}
