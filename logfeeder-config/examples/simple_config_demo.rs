//! Simple configuration demo
//!
//! A minimal example showing how the shipper resolves its configuration

use logfeeder_config::{ConfigLoader, ConfigResult, SubConfigs, LOGFEEDER_PROPERTIES_FILE};
use std::fs;
use tempfile::TempDir;

fn main() -> ConfigResult<()> {
    println!("LogFeeder configuration demo");

    // Create temporary directory for demo files
    let temp_dir = TempDir::new()?;

    let properties = r#"
cluster.name=CL1
logfeeder.log.filter.enable=true
logfeeder.include.default.level=FATAL,ERROR,WARN
logfeeder.solr.urls=https://localhost1:8983/solr,https://localhost2:8983
logfeeder.cloud.storage.mode=hybrid
logfeeder.cloud.storage.destination=hdfs
"#;
    fs::write(temp_dir.path().join(LOGFEEDER_PROPERTIES_FILE), properties)?;

    // Load the configuration, with a system property override on top
    let props = ConfigLoader::new()
        .with_search_path([temp_dir.path()])
        .with_system_property("logfeeder.cloud.storage.base.path", "/apps/demo")
        .load(SubConfigs::default())?;

    println!("Configuration resolved");
    println!("   Cluster: {}", props.cluster_name());
    println!("   Default levels: {:?}", props.include_default_log_levels());
    println!("   Solr URLs: {:?}", props.solr_urls());
    println!(
        "   Cloud storage: {} -> {} at {}",
        props.cloud_storage_mode(),
        props.cloud_storage_destination(),
        props.cloud_base_path()
    );
    println!("   Raw properties: {}", props.raw_properties().len());

    Ok(())
}
