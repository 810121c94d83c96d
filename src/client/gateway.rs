//! Blocking JSON client for the platform management gateway.
//!
//! One `GatewayClient` serves all four capabilities. Every public
//! operation performs its own requests; nothing is cached or pooled
//! beyond what the underlying HTTP client does internally.

use std::fs;
use std::path::Path;

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{
    Error, Result, connection_error, environment_resolution_error, packaging_error,
    remote_operation_error,
};
use crate::fields::{FieldType, FieldValue, format_field_value, parse_field_value};

use super::connection::ConnectionStringBuilder;
use super::deployment::{
    DeploymentExecutor, DeploymentOutcome, DeploymentPackage, DeploymentServer, DeploymentSession,
    ItemQuery, PackageItem, PackageSelection,
};
use super::environment::{EnvironmentServer, EnvironmentTemplate};
use super::project::{CompileOutcome, Project, ProjectSystem};
use super::workflow::{DataField, ProcessInstance, WorkflowConnection};

/// Client for the platform management gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
}

impl GatewayClient {
    /// Creates a client for the gateway on the given host, using the
    /// canonical port.
    pub fn new(host: &str) -> Self {
        Self::from_url(&ConnectionStringBuilder::new(host).gateway_url())
    }

    /// Creates a client for an explicit base URL.
    pub fn from_url(base_url: &str) -> Self {
        GatewayClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// A transport or protocol failure, before mapping to an error kind.
struct HttpFailure {
    status: Option<StatusCode>,
    detail: String,
}

impl HttpFailure {
    fn is_not_found(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND)
    }
}

fn send_json<R: DeserializeOwned>(
    request: RequestBuilder,
) -> std::result::Result<R, HttpFailure> {
    let response = request.send().map_err(|e| HttpFailure {
        status: None,
        detail: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(HttpFailure {
            status: Some(status),
            detail: format!("{status}: {body}"),
        });
    }

    response.json::<R>().map_err(|e| HttpFailure {
        status: None,
        detail: format!("invalid response body: {e}"),
    })
}

fn send_unit(request: RequestBuilder) -> std::result::Result<(), HttpFailure> {
    let response = request.send().map_err(|e| HttpFailure {
        status: None,
        detail: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(HttpFailure {
            status: Some(status),
            detail: format!("{status}: {body}"),
        });
    }

    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct DataFieldDto {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    value: String,
}

#[derive(Debug, Deserialize)]
struct InstanceDto {
    id: i32,
    folio: String,
    #[serde(default)]
    data_fields: Vec<DataFieldDto>,
}

#[derive(Debug, Serialize)]
struct XmlFieldDto {
    name: String,
    value: String,
}

#[derive(Debug, Default, Serialize)]
struct InstanceUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    folio: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    data_fields: Vec<DataFieldDto>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    xml_fields: Vec<XmlFieldDto>,
}

impl InstanceUpdateDto {
    fn is_empty(&self) -> bool {
        self.folio.is_none() && self.data_fields.is_empty() && self.xml_fields.is_empty()
    }
}

/// An open process instance backed by the gateway. Mutators stage changes
/// locally; `update` pushes them in a single request.
struct GatewayProcessInstance {
    http: Client,
    base_url: String,
    id: i32,
    fields: Vec<DataField>,
    staged: InstanceUpdateDto,
    closed: bool,
}

impl WorkflowConnection for GatewayClient {
    fn open_process_instance(&self, process_instance_id: i32) -> Result<Box<dyn ProcessInstance>> {
        let url = self.url(&format!("process-instances/{process_instance_id}"));
        let dto: InstanceDto = send_json(self.http.get(url))
            .map_err(|e| remote_operation_error(process_instance_id, "open", &e.detail))?;

        let mut fields = Vec::with_capacity(dto.data_fields.len());
        for field in dto.data_fields {
            let value = parse_field_value(field.field_type, &field.value)?;
            fields.push(DataField {
                name: field.name,
                field_type: field.field_type,
                value,
            });
        }

        debug!(
            "Opened process instance {} (folio '{}', {} data fields)",
            dto.id,
            dto.folio,
            fields.len()
        );

        Ok(Box::new(GatewayProcessInstance {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            id: dto.id,
            fields,
            staged: InstanceUpdateDto::default(),
            closed: false,
        }))
    }
}

impl ProcessInstance for GatewayProcessInstance {
    fn id(&self) -> i32 {
        self.id
    }

    fn set_folio(&mut self, folio: &str) -> Result<()> {
        self.staged.folio = Some(folio.to_string());
        Ok(())
    }

    fn data_fields(&self) -> Result<Vec<DataField>> {
        Ok(self.fields.clone())
    }

    fn set_data_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        self.staged.data_fields.push(DataFieldDto {
            name: name.to_string(),
            field_type: value.field_type(),
            value: format_field_value(&value),
        });
        Ok(())
    }

    fn set_xml_field(&mut self, name: &str, xml: &str) -> Result<()> {
        self.staged.xml_fields.push(XmlFieldDto {
            name: name.to_string(),
            value: xml.to_string(),
        });
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let url = format!("{}/process-instances/{}", self.base_url, self.id);
        send_unit(self.http.put(url).json(&self.staged))
            .map_err(|e| remote_operation_error(self.id, "update", &e.detail))?;

        self.staged = InstanceUpdateDto::default();
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let url = format!("{}/process-instances/{}/close", self.base_url, self.id);
        send_unit(self.http.post(url))
            .map_err(|e| remote_operation_error(self.id, "close", &e.detail))
    }
}

#[derive(Debug, Serialize)]
struct CreateSessionDto<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionDto {
    id: String,
}

struct GatewaySession {
    http: Client,
    base_url: String,
    id: String,
    name: String,
}

impl GatewaySession {
    fn url(&self, suffix: &str) -> String {
        format!("{}/deployment/sessions/{}{}", self.base_url, self.id, suffix)
    }
}

impl DeploymentServer for GatewayClient {
    fn create_session(&self, name: &str) -> Result<Box<dyn DeploymentSession>> {
        let url = self.url("deployment/sessions");
        let dto: SessionDto = send_json(self.http.post(url).json(&CreateSessionDto { name }))
            .map_err(|e| connection_error(&e.detail))?;

        Ok(Box::new(GatewaySession {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            id: dto.id,
            name: name.to_string(),
        }))
    }
}

#[derive(Debug, Serialize)]
struct SessionOptionDto<'a> {
    name: &'a str,
    value: bool,
}

#[derive(Debug, Deserialize)]
struct PackageImageDto {
    /// Base64-encoded package bytes
    content: String,
}

impl DeploymentSession for GatewaySession {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_option(&mut self, name: &str, value: bool) -> Result<()> {
        send_unit(
            self.http
                .post(self.url("/options"))
                .json(&SessionOptionDto { name, value }),
        )
        .map_err(|e| connection_error(&e.detail))
    }

    fn find_items(&mut self, query: &ItemQuery) -> Result<Vec<PackageItem>> {
        send_json(self.http.get(self.url("/items")).query(&[
            ("name", query.name_pattern.as_str()),
            ("namespace", query.namespace.as_str()),
        ]))
        .map_err(|e| Error::Query {
            pattern: query.name_pattern.clone(),
            namespace: query.namespace.clone(),
            detail: e.detail,
        })
    }

    fn package_items(&mut self, selection: &PackageSelection) -> Result<Vec<u8>> {
        let dto: PackageImageDto =
            send_json(self.http.post(self.url("/package")).json(selection))
                .map_err(|e| packaging_error(&e.detail))?;

        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(&dto.content)
            .map_err(|e| packaging_error(&format!("invalid package image encoding: {e}")))
    }

    fn close(&mut self) -> Result<()> {
        send_unit(self.http.delete(self.url("")))
            .map_err(|e| connection_error(&e.detail))
    }
}

impl EnvironmentServer for GatewayClient {
    fn refresh(&self) -> Result<()> {
        send_unit(self.http.post(self.url("environment/refresh")))
            .map_err(|e| connection_error(&e.detail))
    }

    fn template(&self, name: &str) -> Result<EnvironmentTemplate> {
        send_json(self.http.get(self.url(&format!("environment/templates/{name}")))).map_err(
            |e| {
                if e.is_not_found() {
                    environment_resolution_error("environment template", name)
                } else {
                    connection_error(&e.detail)
                }
            },
        )
    }
}

#[derive(Debug, Serialize)]
struct CompileRequestDto<'a> {
    name: &'a str,
    content: &'a str,
}

impl ProjectSystem for GatewayClient {
    fn load(&self, path: &Path) -> Result<Project> {
        let content = fs::read_to_string(path).map_err(|e| Error::ProjectLoad {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        if content.trim().is_empty() {
            return Err(Error::ProjectLoad {
                path: path.to_path_buf(),
                detail: "project file is empty".to_string(),
            });
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| Error::ProjectLoad {
                path: path.to_path_buf(),
                detail: "project file name is not valid unicode".to_string(),
            })?;

        Ok(Project {
            path: path.to_path_buf(),
            name,
            content,
        })
    }

    fn compile(&self, project: &Project) -> Result<CompileOutcome> {
        send_json(
            self.http
                .post(self.url("projects/compile"))
                .json(&CompileRequestDto {
                    name: &project.name,
                    content: &project.content,
                }),
        )
        .map_err(|e| connection_error(&e.detail))
    }
}

impl DeploymentExecutor for GatewayClient {
    fn execute(&self, package: &DeploymentPackage) -> Result<DeploymentOutcome> {
        send_json(self.http.post(self.url("deployment/execute")).json(package))
            .map_err(|e| Error::Deployment { detail: e.detail })
    }
}
