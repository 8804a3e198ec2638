#![feature(proc_macro_hygiene, decl_macro)]


#[macro_use] extern crate lazy_static;
#[macro_use] extern crate rocket;
#[macro_use] extern crate log;


mod logger;
mod util;
mod snapshot_sys;
mod layer_sys;


use std::path::{Path, PathBuf};
use log::LevelFilter;
use rocket::response::NamedFile;


const STATIC_DIR: &'static str = "static/";

static LOGGER: logger::Logger = logger::Logger;


#[get("/")]
fn index() -> &'static str {
    "City Map Server"
}

#[get("/<file..>")]
fn get_static_file(file: PathBuf) -> Option<NamedFile> {
    NamedFile::open(Path::new(STATIC_DIR).join(file)).ok()
}


fn create_rocket() -> rocket::Rocket {
    rocket::ignite()
        .mount("/", routes![index])
        .mount(&format!("/{}", STATIC_DIR), routes![get_static_file])
        .mount("/", routes![
            snapshot_sys::get_snapshot_metadata,
        ])
        .mount("/", routes![
            layer_sys::get_layer_data,
        ])
}

fn main() {
    log::set_logger(&LOGGER)
        .map(|_| log::set_max_level(LevelFilter::Info))
        .expect("Logger initialization failed.");

    create_rocket().launch();
}
