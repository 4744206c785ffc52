use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use assigner_errors::{AssignerError, AssignerResult};

/// 应用配置，支持TOML文件加载与环境变量覆盖。
/// 环境变量以 `ASSIGNER` 为前缀、`__` 为分隔符，
/// 例如 `ASSIGNER__API__TIMEOUT_SECONDS=30`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 仓库后端的基础地址
    pub base_url: String,
    pub timeout_seconds: u64,
    /// 对话框默认拉取的人员类别
    pub default_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 10,
            default_role: "warehouse-staff".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载配置：文件可选，环境变量覆盖文件取值
    pub fn load(config_path: Option<&str>) -> AssignerResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            if !std::path::Path::new(path).exists() {
                return Err(AssignerError::config_error(format!(
                    "配置文件不存在: {path}"
                )));
            }
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("ASSIGNER").separator("__"))
            .build()
            .map_err(|e| AssignerError::config_error(e.to_string()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| AssignerError::config_error(e.to_string()))?;
        config.validate()?;

        debug!("Configuration loaded: backend {}", config.api.base_url);
        Ok(config)
    }

    pub fn validate(&self) -> AssignerResult<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(AssignerError::config_error(format!(
                "无效的后端地址: {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AssignerError::config_error("请求超时必须大于0秒"));
        }
        if self.api.default_role.trim().is_empty() {
            return Err(AssignerError::config_error("默认人员类别不能为空"));
        }
        match self.log.format.as_str() {
            "json" | "pretty" => {}
            other => {
                return Err(AssignerError::config_error(format!(
                    "不支持的日志格式: {other}"
                )));
            }
        }
        Ok(())
    }
}
