pub(crate) mod present;
pub(crate) mod raster;
