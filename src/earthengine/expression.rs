//! Earth Engine computation expression templating.

use time::Date;

use crate::geo::Region;

const COLLECTION_ID: &str = "COPERNICUS/S2_SR";
const NIR_BAND: &str = "B8";
const RED_BAND: &str = "B4";

/// Render the Sentinel-2 NDVI expression for `region` over `[start, end]`.
///
/// The rectangle is written as `[[swLat, swLng], [neLat, neLng]]`.
#[must_use]
pub fn ndvi_expression(region: &Region, start: Date, end: Date) -> String {
    let sw = region.south_west();
    let ne = region.north_east();

    format!(
        r"var dataset = ee.ImageCollection('{COLLECTION_ID}')
    .filterBounds(ee.Geometry.Rectangle([[{sw_lat},{sw_lng}],[{ne_lat},{ne_lng}]]))
    .filterDate('{start}', '{end}');

var ndvi = dataset.map(function(img) {{
    return img.normalizedDifference(['{NIR_BAND}', '{RED_BAND}'])
        .rename('NDVI')
        .set('system:time_start', img.get('system:time_start'));
}});

return ndvi;
",
        sw_lat = sw.lat,
        sw_lng = sw.lng,
        ne_lat = ne.lat,
        ne_lng = ne.lng,
    )
}

#[cfg(test)]
#[path = "expression_test.rs"]
mod tests;
