pub(crate) mod bevel;
pub(crate) mod compositor;
pub(crate) mod pipeline;
pub(crate) mod silhouette;
pub(crate) mod specular;
pub(crate) mod surface;
pub(crate) mod text;
pub(crate) mod thumbnail;
