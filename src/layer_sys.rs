use std::{
    collections::HashSet,
    fs,
    path::Path,
};
use rocket::{
    http::Status,
    response::{
        content::Json,
        status::Custom,
    },
};
use serde_json::{json, Value as JsonValue};


type JsonResult = Result<Json<String>, Custom<Json<String>>>;


pub const LAYER_DATA_DIR: &'static str = "db-data/";


lazy_static! {
    static ref ALLOWED_LAYERS: HashSet<&'static str> = {
        [
            "blok_perancangan",
            "bridge",
            "cctv",
            "charting_km",
            "constructed_slope",
            "drainage",
            "earth_work",
            "feeder_pillar",
            "flexible_post",
            "gtmix",
            "gtnh_semasa",
            "jalan",
            "jalan_kejuruteraan",
            "komited_km",
            "location_map_aset",
            "location_map_aset_item",
            "lokasi_banjir",
            "ndcdb20",
            "ndcdb23",
            "pasar_awam",
            "pasar_malam",
            "pasar_sari",
            "pasar_tani",
            "road_hump",
            "road_marking_linear",
            "road_marking_point",
            "road_median",
            "road_shoulder",
            "sampah_haram",
            "sempadan_daerah",
            "sempadan_taman",
            "signboard",
            "sport_facility",
            "street_lighting",
            "taman_perumahan",
            "traffic_light",
            "warta_kawasan_lapang",
            "zon_ahli_majlis",
            "ekompaun_mpsp_summary",
            "maklumat_akaun_analytics",
        ].iter().cloned().collect()
    };

    // These two layers ship inside the binary; some deployments have no
    // db-data directory at all.
    static ref EKOMPAUN_SUMMARY: String = {
        serde_json::from_str::<JsonValue>(include_str!("../data/ekompaun_mpsp_summary.json"))
            .expect("Invalid ekompaun_mpsp_summary.json")
            .to_string()
    };
    static ref AKAUN_ANALYTICS: String = {
        serde_json::from_str::<JsonValue>(include_str!("../data/maklumat_akaun_analytics.json"))
            .expect("Invalid maklumat_akaun_analytics.json")
            .to_string()
    };
}


#[get("/api/db-data/<layer>")]
pub fn get_layer_data(layer: String) -> JsonResult {
    if !ALLOWED_LAYERS.contains(layer.as_str()) {
        return Err(Custom(Status::BadRequest,
            Json(json!({ "error": "Invalid or unknown layer" }).to_string())));
    }

    match layer.as_str() {
        "ekompaun_mpsp_summary" => return Ok(Json(EKOMPAUN_SUMMARY.clone())),
        "maklumat_akaun_analytics" => return Ok(Json(AKAUN_ANALYTICS.clone())),
        _ => (),
    }

    load_layer_file(Path::new(LAYER_DATA_DIR), &layer)
        .map(Json)
        .map_err(|err| {
            warn!("Fail to load layer {}: {}", layer, err);

            Custom(Status::InternalServerError,
                Json(json!({
                    "error": "Failed to load layer data",
                    "detail": err,
                }).to_string()))
        })
}

fn load_layer_file(dir: &Path, layer: &str) -> Result<String, String> {
    fs::read_to_string(dir.join(format!("{}.json", layer)))
        .map_err(|err| err.to_string())
        .and_then(|raw| {
            serde_json::from_str::<JsonValue>(&raw)
                .map_err(|err| err.to_string())
        })
        .map(|data| match data {
            // GIS exports come as bare arrays; key them by layer name so
            // every layer responds with one object shape.
            JsonValue::Array(items) => json!({ layer: items }).to_string(),
            other => other.to_string(),
        })
}
