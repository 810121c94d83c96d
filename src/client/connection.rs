use crate::constants::GATEWAY_PORT;

/// Builder for the canonical platform connection string.
///
/// The same string is stamped onto deployment packages for both the
/// SmartObject and workflow-management targets, and its host/port pair is
/// what the gateway client connects to.
#[derive(Debug, Clone)]
pub struct ConnectionStringBuilder {
    pub host: String,
    pub port: u16,
    pub integrated: bool,
    pub is_primary_login: bool,
    pub authenticate: bool,
    pub encrypted_password: bool,
}

impl ConnectionStringBuilder {
    pub fn new(host: &str) -> Self {
        ConnectionStringBuilder {
            host: host.to_string(),
            port: GATEWAY_PORT,
            integrated: true,
            is_primary_login: true,
            authenticate: true,
            encrypted_password: false,
        }
    }

    /// Renders the key=value connection string.
    pub fn build(&self) -> String {
        format!(
            "Host={};Port={};Integrated={};IsPrimaryLogin={};Authenticate={};EncryptedPassword={}",
            self.host,
            self.port,
            flag(self.integrated),
            flag(self.is_primary_login),
            flag(self.authenticate),
            flag(self.encrypted_password),
        )
    }

    /// Base URL of the management gateway for the same host/port pair.
    pub fn gateway_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
