//! Coolify deployment platform (`/applications` endpoints).

use crate::catalog::{HttpRoute, ToolArguments, ToolDescriptor, ToolEntry};
use crate::error::Result;
use crate::upstream::{UpstreamRequest, UpstreamTarget};
use std::sync::Arc;

pub const NAME: &str = "coolify";

pub fn tools(target: Arc<UpstreamTarget>) -> Vec<ToolEntry> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new("coolify_list_apps", "Liste toutes les applications Coolify"),
            HttpRoute::json(target.clone(), list_apps),
        ),
        ToolEntry::new(
            ToolDescriptor::new("coolify_get_app", "Récupère les détails d'une application")
                .required("appId", "string", "ID de l'application"),
            HttpRoute::json(target.clone(), get_app),
        ),
        ToolEntry::new(
            ToolDescriptor::new("coolify_deploy_app", "Lance le déploiement d'une application")
                .required("appId", "string", "ID de l'application"),
            HttpRoute::confirm(target, deploy_app, deploy_started),
        ),
    ]
}

pub fn list_apps(_args: &ToolArguments) -> Result<UpstreamRequest> {
    Ok(UpstreamRequest::get(["applications"]))
}

pub fn get_app(args: &ToolArguments) -> Result<UpstreamRequest> {
    let app_id = args.required_str("appId")?;
    Ok(UpstreamRequest::get(["applications", app_id.as_str()]))
}

pub fn deploy_app(args: &ToolArguments) -> Result<UpstreamRequest> {
    let app_id = args.required_str("appId")?;
    Ok(UpstreamRequest::post(["applications", app_id.as_str(), "deploy"]))
}

fn deploy_started(args: &ToolArguments) -> Result<String> {
    Ok(format!(
        "Déploiement lancé pour l'application {}",
        args.required_str("appId")?
    ))
}
