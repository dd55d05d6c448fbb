//! Bakes `PRESSROOM_*` settings from the environment (and an optional `.env`)
//! into `$OUT_DIR/env.rs` so the wasm bundle carries them as constants.

use std::env;
use std::fs;
use std::path::Path;

const VARS: &[(&str, &str)] = &[
    ("PRESSROOM_SERVER_BASE", ""),
    ("PRESSROOM_API_BASE", "/api"),
    ("PRESSROOM_APP_ENV", "dev"),
];

fn main() {
    // Missing .env is fine; plain environment variables still apply.
    let _ = dotenvy::dotenv();

    let mut out = String::from("// Generated by build.rs. Do not edit.\n");
    for (name, default) in VARS {
        println!("cargo:rerun-if-env-changed={name}");
        let value = env::var(name).unwrap_or_else(|_| default.to_string());
        out.push_str(&format!("pub const {name}: &str = {value:?};\n"));
    }
    println!("cargo:rerun-if-changed=.env");

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    fs::write(Path::new(&out_dir).join("env.rs"), out).expect("write env.rs");
}
