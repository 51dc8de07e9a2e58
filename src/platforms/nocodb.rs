//! NocoDB database platform (v1 meta and data APIs).

use crate::catalog::{HttpRoute, ToolArguments, ToolDescriptor, ToolEntry};
use crate::error::Result;
use crate::upstream::{UpstreamRequest, UpstreamTarget};
use serde_json::json;
use std::sync::Arc;

pub const NAME: &str = "nocodb";

pub const DEFAULT_RECORD_LIMIT: u64 = 25;

const META_PROJECTS: [&str; 5] = ["api", "v1", "db", "meta", "projects"];
const DATA: [&str; 5] = ["api", "v1", "db", "data", "v1"];

pub fn tools(target: Arc<UpstreamTarget>) -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new("nocodb_list_bases", "Liste toutes les bases NocoDB"),
            HttpRoute::json(target.clone(), list_bases),
        ),
        ToolEntry::new(
            ToolDescriptor::new("nocodb_list_tables", "Liste les tables d'une base")
                .required("baseId", "string", "ID de la base"),
            HttpRoute::json(target.clone(), list_tables),
        ),
        ToolEntry::new(
            ToolDescriptor::new("nocodb_get_records", "Récupère les enregistrements d'une table")
                .required("baseId", "string", "ID de la base")
                .required("tableName", "string", "Nom de la table")
                .optional(
                    "limit",
                    "number",
                    "Nombre maximum d'enregistrements",
                    Some(json!(DEFAULT_RECORD_LIMIT)),
                ),
            HttpRoute::json(target.clone(), get_records),
        ),
        ToolEntry::new(
            ToolDescriptor::new("nocodb_create_record", "Crée un enregistrement")
                .required("baseId", "string", "ID de la base")
                .required("tableName", "string", "Nom de la table")
                .required("data", "object", "Champs de l'enregistrement"),
            HttpRoute::json(target.clone(), create_record),
        ),
        ToolEntry::new(
            ToolDescriptor::new("nocodb_update_record", "Met à jour un enregistrement")
                .required("baseId", "string", "ID de la base")
                .required("tableName", "string", "Nom de la table")
                .required("recordId", "string", "ID de l'enregistrement")
                .required("data", "object", "Champs à modifier"),
            HttpRoute::json(target.clone(), update_record),
        ),
        ToolEntry::new(
            ToolDescriptor::new("nocodb_delete_record", "Supprime un enregistrement")
                .required("baseId", "string", "ID de la base")
                .required("tableName", "string", "Nom de la table")
                .required("recordId", "string", "ID de l'enregistrement"),
            HttpRoute::confirm(target, delete_record, record_deleted),
        ),
    ]
}

fn meta_path<const N: usize>(tail: [&str; N]) -> Vec<String> {
    META_PROJECTS.iter().chain(tail.iter()).map(|s| s.to_string()).collect()
}

/// `/api/v1/db/data/v1/{baseId}/{tableName}`
fn table_path(args: &ToolArguments) -> Result<Vec<String>> {
    let base_id = args.required_str("baseId")?;
    let table_name = args.required_str("tableName")?;
    Ok(DATA
        .iter()
        .map(|s| s.to_string())
        .chain([base_id, table_name])
        .collect())
}

fn record_path(args: &ToolArguments) -> Result<Vec<String>> {
    let mut path = table_path(args)?;
    path.push(args.required_str("recordId")?);
    Ok(path)
}

pub fn list_bases(_args: &ToolArguments) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::get(meta_path([])))
}

pub fn list_tables(args: &ToolArguments) -> Result<UpstreamRequest> {
    let base_id = args.required_str("baseId")?;
    Ok(UpstreamRequest::get(meta_path([base_id.as_str(), "tables"])))
}

pub fn get_records(args: &ToolArguments) -> Result<UpstreamRequest> {
    let limit = args.optional_u64("limit")?.unwrap_or(DEFAULT_RECORD_LIMIT);
    Ok(UpstreamRequest::get(table_path(args)?).query("limit", limit))
}

pub fn create_record(args: &ToolArguments) -> Result<UpstreamRequest> {
    let data = args.required_object("data")?;
    Ok(UpstreamRequest::post(table_path(args)?).json(data))
}

pub fn update_record(args: &ToolArguments) -> Result<UpstreamRequest> {
    let data = args.required_object("data")?;
    Ok(UpstreamRequest::patch(record_path(args)?).json(data))
}

pub fn delete_record(args: &ToolArguments) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::delete(record_path(args)?))
}

fn record_deleted(args: &ToolArguments) -> Result<String> {
    Ok(format!(
        "Enregistrement {} supprimé de la table {}",
        args.required_str("recordId")?,
        args.required_str("tableName")?
    ))
}
