//! Build script for storefront crate.
//!
//! Fingerprints the stylesheet so `base.html` can link a content-addressed
//! copy that is safe to cache forever.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let hash = match fingerprint_css() {
        Ok(hash) => hash,
        Err(e) => {
            // Templates fall back to the unhashed path.
            println!("cargo:warning=Could not fingerprint main.css: {e}");
            String::new()
        }
    };
    println!("cargo:rustc-env=CSS_HASH={hash}");
}

/// Copy `static/css/main.css` to `static/css/derived/main.<hash>.css`.
fn fingerprint_css() -> io::Result<String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let static_dir = Path::new(&manifest_dir).join("static/css");
    let css_path = static_dir.join("main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = fs::read(&css_path)?;
    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = digest.get(..HASH_LEN).unwrap_or(&digest).to_string();

    let derived_dir = static_dir.join("derived");
    fs::create_dir_all(&derived_dir)?;
    fs::copy(&css_path, derived_dir.join(format!("main.{hash}.css")))?;

    Ok(hash)
}
