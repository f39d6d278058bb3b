use std::path::PathBuf;

use prost::Message as _;

const PROTO: &str = "proto/catalog.proto";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={PROTO}");

    // protox parses the definitions in-process, so no protoc is needed on the host.
    let descriptors = protox::compile(["catalog.proto"], ["proto"])?;
    let descriptor_path = PathBuf::from(std::env::var("OUT_DIR")?).join("catalog_descriptor.bin");
    std::fs::write(&descriptor_path, descriptors.encode_to_vec())?;

    let mut config = prost_build::Config::new();
    config
        .file_descriptor_set_path(&descriptor_path)
        .skip_protoc_run();

    tonic_build::configure()
        .type_attribute(".", "#[derive(serde::Serialize)]")
        .field_attribute(".catalog.FileInfo.data", "#[serde(skip)]")
        .field_attribute(
            ".catalog.InfoApplicationResponse.readme_file",
            "#[serde(serialize_with = \"lossy_utf8\")]",
        )
        .compile_with_config(config, &[PROTO], &["proto"])?;
    Ok(())
}
