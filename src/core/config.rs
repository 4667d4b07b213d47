//! 服务器配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/comanda | 工作目录 (data/ 与 reports/ 的父目录) |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | TIMEZONE | America/Bogota | 业务时区 (到店时间与营业日期) |
//! | ARCHIVE_INTERVAL_SECS | 86400 | 归档周期 (秒)，从进程启动起算 |
//! | ADMIN_USER / ADMIN_PASS | admin / (空) | 管理端共享凭证；密码为空时管理端点全部拒绝 |
//! | ENVIRONMENT | development | 运行环境 |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/comanda HTTP_PORT=8080 ADMIN_PASS=secret cargo run
//! ```

use std::path::PathBuf;

use chrono_tz::Tz;

use crate::utils::{AppResult, time};

/// 共享凭证对 (单角色单账号)
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: String,
    pub pass: String,
}

impl Credential {
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// 密码为空表示未配置，所有请求一律拒绝
    pub fn matches(&self, user: &str, pass: &str) -> bool {
        !self.pass.is_empty() && self.user == user && self.pass == pass
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据文件、报表等
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 业务时区
    pub timezone: Tz,
    /// 归档周期 (秒)
    pub archive_interval_secs: u64,
    /// 管理端凭证 (菜单写操作、历史查询)
    pub admin: Credential,
    /// 运行环境: development | staging | production
    pub environment: String,
}

/// 默认业务时区 — 餐厅所在地
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Bogota;

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("TIMEZONE")
                .map(|name| time::parse_timezone(&name, DEFAULT_TIMEZONE))
                .unwrap_or(DEFAULT_TIMEZONE),
            archive_interval_secs: std::env::var("ARCHIVE_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(24 * 60 * 60),
            admin: Credential::new(
                std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".into()),
                std::env::var("ADMIN_PASS").unwrap_or_default(),
            ),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据文件目录 (menu.json, history.json)
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("data")
    }

    pub fn menu_file(&self) -> PathBuf {
        self.data_dir().join("menu.json")
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir().join("history.json")
    }

    /// 每日报表目录
    pub fn reports_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("reports")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> AppResult<()> {
        std::fs::create_dir_all(self.data_dir())?;
        std::fs::create_dir_all(self.reports_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
