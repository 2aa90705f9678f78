#[allow(unused_imports)]
use schemagen::schema::{AttrValue, Elem, Resource, ResourceData, Schema, SchemaMap, ValueKind, schema_map};
#[allow(unused_imports)]
use schemagen::schema::serde_json::{self, Value};

pub fn switch_schema() -> SchemaMap {
    schema_map! {
        "backup" => Schema {
            kind: Some(ValueKind::List),
            elem: Some(Elem::Resource(Resource {
                schema: schema_map! {
                    "id" => Schema {
                        kind: Some(ValueKind::String),
                        ..Default::default()
                    },
                    "vlan" => Schema {
                        kind: Some(ValueKind::Int),
                        ..Default::default()
                    },
                },
            })),
            max_items: 1,
            ..Default::default()
        },
        "description" => Schema {
            kind: Some(ValueKind::String),
            ..Default::default()
        },
        "enabled" => Schema {
            kind: Some(ValueKind::Bool),
            ..Default::default()
        },
        "labels" => Schema {
            kind: Some(ValueKind::Map),
            ..Default::default()
        },
        "mtu" => Schema {
            kind: Some(ValueKind::Int),
            optional: true,
            default: Some(AttrValue::Int(1500)),
            ..Default::default()
        },
        "name" => Schema {
            kind: Some(ValueKind::String),
            required: true,
            description: "Switch name.".into(),
            ..Default::default()
        },
        "ports" => Schema {
            kind: Some(ValueKind::Set),
            elem: Some(Elem::Resource(Resource {
                schema: schema_map! {
                    "id" => Schema {
                        kind: Some(ValueKind::String),
                        ..Default::default()
                    },
                    "vlan" => Schema {
                        kind: Some(ValueKind::Int),
                        ..Default::default()
                    },
                },
            })),
            ..Default::default()
        },
        "ratio" => Schema {
            kind: Some(ValueKind::Float),
            ..Default::default()
        },
        "tags" => Schema {
            kind: Some(ValueKind::List),
            elem: Some(Elem::Schema(Box::new(Schema { kind: Some(ValueKind::String), ..Default::default() }))),
            ..Default::default()
        },
        "trunk" => Schema {
            kind: Some(ValueKind::List),
            elem: Some(Elem::Schema(Box::new(Schema { kind: Some(ValueKind::Int), ..Default::default() }))),
            ..Default::default()
        },
        "uplink" => Schema {
            kind: Some(ValueKind::List),
            elem: Some(Elem::Resource(Resource {
                schema: schema_map! {
                    "id" => Schema {
                        kind: Some(ValueKind::String),
                        ..Default::default()
                    },
                    "vlan" => Schema {
                        kind: Some(ValueKind::Int),
                        ..Default::default()
                    },
                },
            })),
            max_items: 1,
            ..Default::default()
        },
    }
}

pub fn expand_switch(d: &ResourceData) -> crate::types::Switch {
    let mut obj = crate::types::Switch::default();
    obj.backup = d.get("backup").get(0).filter(|v| !v.is_null()).map(|v| expand_port(v));
    obj.common.description = d.get("description").as_str().map(str::to_owned);
    obj.enabled = d.get("enabled").as_bool().unwrap_or_default();
    obj.labels = d.get("labels").as_object().into_iter().flatten().map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_owned())).collect();
    obj.mtu = u32::try_from(d.get("mtu").as_u64().unwrap_or_default()).unwrap_or_default();
    obj.name = d.get("name").as_str().unwrap_or_default().to_owned();
    let mut s_ports = Vec::new();
    for v in d.get("ports").as_array().into_iter().flatten() {
        let w = expand_port(v);
        s_ports.push(w);
    }
    obj.ports = s_ports.into_iter().collect();
    obj.ratio = d.get("ratio").as_f64().unwrap_or_default();
    let mut s_tags = Vec::new();
    for v in d.get("tags").as_array().into_iter().flatten() {
        let w = v.as_str().unwrap_or_default().to_owned();
        s_tags.push(w);
    }
    obj.tags = s_tags.into_iter().collect();
    let mut s_trunk = Vec::new();
    for v in d.get("trunk").as_array().into_iter().flatten() {
        let w = u16::try_from(v.as_u64().unwrap_or_default()).unwrap_or_default();
        s_trunk.push(w);
    }
    obj.trunk = d.get("trunk").as_array().map(|_| s_trunk.into_iter().collect());
    obj.uplink = expand_port(&d.get("uplink")[0]);
    obj
}

pub fn expand_port(d: &Value) -> crate::types::Port {
    let mut obj = crate::types::Port::default();
    obj.id = d["id"].as_str().unwrap_or_default().to_owned();
    obj.vlan = u16::try_from(d["vlan"].as_u64().unwrap_or_default()).unwrap_or_default();
    obj
}
