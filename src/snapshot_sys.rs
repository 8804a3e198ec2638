use std::{
    collections::BTreeMap,
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

use crate::util;


type JsonResult = Result<Json<String>, Custom<Json<String>>>;


pub const SNAPSHOT_DIR: &'static str = "static/cctv-snapshots/";
const METADATA_FILE: &'static str = "metadata.json";


struct DeviceStatus {
    timestamp: u64,
    success: bool,
}


#[get("/api/cctv-snapshots/metadata")]
pub fn get_snapshot_metadata() -> JsonResult {
    build_snapshot_metadata(Path::new(SNAPSHOT_DIR))
        .map(Json)
        .map_err(|err| {
            error!("Fail to build snapshot metadata: {}", err);

            Custom(Status::InternalServerError,
                Json(json!({ "error": "Failed to read snapshot metadata" }).to_string()))
        })
}

fn build_snapshot_metadata(dir: &Path) -> Result<String, String> {
    let mut devices = BTreeMap::new();
    let mut last_updated = 0;

    // The sidecar document is optional; absent or broken just means an
    // empty baseline.
    if let Some(meta) = read_sidecar(&dir.join(METADATA_FILE)) {
        if let Some(time) = meta["lastUpdated"].as_u64() {
            last_updated = time;
        }

        if let Some(entries) = meta["devices"].as_object() {
            for (device_id, entry) in entries {
                devices.insert(device_id.clone(), DeviceStatus {
                    timestamp: entry["timestamp"].as_u64()
                        .unwrap_or_else(util::current_millis),
                    success: entry["success"].as_bool() == Some(true),
                });
            }
        }
    }

    overlay_snapshot_files(dir, &mut devices);

    let device_jsons = devices.iter()
        .map(|(device_id, status)| {
            json!({
                "deviceId": device_id,
                "timestamp": status.timestamp,
                "success": status.success,
                "imageUrl": format!("/{}{}.jpg", SNAPSHOT_DIR, device_id),
            })
        })
        .collect::<Vec<_>>();

    if last_updated == 0 {
        last_updated = util::current_millis();
    }

    Ok(json!({
        "lastUpdated": last_updated,
        "devices": device_jsons,
    }).to_string())
}

fn read_sidecar(path: &Path) -> Option<JsonValue> {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

fn overlay_snapshot_files(dir: &Path, devices: &mut BTreeMap<String, DeviceStatus>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Fail to read snapshot directory: {}", err);
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.to_lowercase().ends_with(".jpg") {
            continue;
        }

        let device_id = name[..name.len() - 4].to_owned();

        if let Some(status) = devices.get_mut(&device_id) {
            // The image on disk proves the last capture worked, whatever
            // the sidecar recorded.
            status.success = true;
        }
        else {
            devices.insert(device_id, DeviceStatus {
                timestamp: util::current_millis(),
                success: true,
            });
        }
    }
}
