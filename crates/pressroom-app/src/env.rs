//! Compile-time settings generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/env.rs"));
