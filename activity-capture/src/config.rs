use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(from = "BIND_HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "BIND_PORT", default = "8787")]
    pub port: u16,

    /// Root directory for per-project digest output. The ingestion tool
    /// downstream watches this tree.
    #[envconfig(from = "OUTPUT_DIR", default = "notebooklm_output")]
    pub output_dir: String,

    /// Project that webhook events land in when the payload carries no
    /// project mapping of its own.
    #[envconfig(from = "DEFAULT_WEBHOOK_PROJECT", default = "linear-import")]
    pub default_webhook_project: String,

    /// Directory the dashboard assets are served from.
    #[envconfig(from = "STATIC_DIR", default = "public")]
    pub static_dir: String,

    #[envconfig(from = "EXPORT_PROMETHEUS", default = "true")]
    pub export_prometheus: bool,
}

impl Config {
    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use envconfig::Envconfig;

    #[test]
    fn defaults_match_the_deployed_layout() {
        let config = Config::init_from_hashmap(&std::collections::HashMap::new()).unwrap();
        assert_eq!(config.bind(), "0.0.0.0:8787");
        assert_eq!(config.output_dir, "notebooklm_output");
        assert_eq!(config.default_webhook_project, "linear-import");
    }
}
