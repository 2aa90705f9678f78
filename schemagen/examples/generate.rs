//! Example generating the schema and expand functions of a switch spec.
//!
//! Run with: `cargo run --example generate -- [output-dir]`
//!
//! Set `RUST_LOG=debug` to see which fields the walker drops.

use schemagen::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Uplink port policy.
#[derive(Debug, Default, Reflect)]
#[schema(path = "types::UplinkPolicy")]
#[allow(dead_code)]
struct UplinkPolicy {
    active_uplinks: Vec<String>,
    standby_uplinks: Vec<String>,
    notify_switches: Option<bool>,
}

/// Settings shared by every network object.
#[derive(Debug, Default, Reflect)]
#[schema(path = "types::ObjectSpec")]
#[allow(dead_code)]
struct ObjectSpec {
    name: String,
    description: Option<String>,
}

/// Host membership entry.
#[derive(Debug, Default, Reflect)]
#[schema(path = "types::HostMember")]
#[allow(dead_code)]
struct HostMember {
    host_id: String,
    max_proxy_switch_ports: i32,
}

/// Distributed virtual switch creation spec.
#[derive(Debug, Default, Reflect)]
#[schema(path = "types::DvsCreateSpec")]
#[allow(dead_code)]
struct DvsCreateSpec {
    #[schema(flatten)]
    object: ObjectSpec,
    #[schema(rename = "mtu")]
    max_mtu: u32,
    num_standalone_ports: i32,
    uplink_policy: UplinkPolicy,
    hosts: Vec<HostMember>,
    #[schema(skip)]
    config_version: String,
    extra: Option<Box<dyn std::any::Any + Send + Sync>>,
}

fn filter_dvs_create_spec(state: GenFieldState) -> Result<GenFieldState, FilterError> {
    match state.name() {
        "name" => Ok(state.with_schema(|s| {
            s.required = true;
            s.description = "The name of the distributed virtual switch.".to_string();
        })),
        "mtu" => Ok(state.with_schema(|s| {
            s.optional = true;
            s.default = Some(AttrValue::Int(1500));
        })),
        "active_uplinks" | "standby_uplinks" => Ok(state.with_schema(|s| s.optional = true)),
        _ => Ok(state),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("schemagen-dvs"));

    let printer = Printer::new("dvs", &dir).with_generator(
        SchemaGenerator::of::<DvsCreateSpec>("dvs_create_spec.rs", "schema_dvs_create_spec")
            .with_filter(filter_dvs_create_spec),
    );

    for path in printer.run()? {
        tracing::info!("Wrote {}", path.display());
        println!("{}", std::fs::read_to_string(&path)?);
    }
    Ok(())
}
