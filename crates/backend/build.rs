use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies config.toml and the data/*.json files from the workspace root next
/// to the built binary, where the runner looks for them.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../data");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR is target/<profile>/build/lpg-backend-xxx/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory")
        .to_path_buf();

    let workspace_root: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root")
        .to_path_buf();

    let source_config = workspace_root.join("config.toml");
    if source_config.exists() {
        fs::copy(&source_config, target_dir.join("config.toml"))
            .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
    } else {
        println!("cargo:warning=config.toml not found at {:?}, using default config", source_config);
    }

    let source_data = workspace_root.join("data");
    let Ok(entries) = fs::read_dir(&source_data) else {
        println!("cargo:warning=data directory not found at {:?}", source_data);
        return;
    };

    let dest_data = target_dir.join("data");
    fs::create_dir_all(&dest_data).unwrap_or_else(|e| panic!("Failed to create {:?}: {}", dest_data, e));

    let mut copied = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            let dest = dest_data.join(entry.file_name());
            fs::copy(&path, &dest).unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", path, e));
            copied += 1;
        }
    }
    println!("cargo:warning=Copied {} data files to {:?}", copied, dest_data);
}
