// Build script: stages `static/` (page + wasm-pack output in `static/pkg`) into `dist/`.
//
// The wasm bundle itself comes from `wasm-pack build --target web --out-dir static/pkg`;
// invoking wasm-pack from here would re-enter this script through its own cargo build.
use std::{fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions::new().overwrite(true).content_only(true);
        if let Err(err) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=failed to stage static site: {err}");
        }
    }
}
