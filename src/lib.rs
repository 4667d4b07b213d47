//! Comanda Server - 单店实时点餐后端
//!
//! # 架构概述
//!
//! 本 crate 是一个面向单店的点餐后端，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 内存订单队列、状态流转、每日归档
//! - **实时广播** (`message` + `api::events`): 向厨房屏/管理屏推送变更
//! - **菜单目录** (`menu`): JSON 文件持久化的键值 CRUD
//! - **历史日志** (`history`): 归档订单的追加式持久记录
//! - **每日报表** (`report`): 按营业日期生成的电子表格
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── auth/          # Basic 凭证校验
//! ├── orders/        # 订单队列、生命周期、归档
//! ├── menu/          # 菜单目录
//! ├── history/       # 历史日志
//! ├── report/        # 每日报表
//! ├── message/       # 消息总线
//! ├── storage/       # JSON 文件读写
//! └── utils/         # 错误、日志、时区工具
//! ```
//!
//! # 数据流
//!
//! ```text
//! 点餐端 ──▶ POST /order ──▶ 验证 ──▶ OrderManager ──▶ 广播 order-created
//!                                        │
//!               归档调度器 (每个周期) ──▶ 快照 ──▶ 报表 + 历史 ──▶ 清空队列
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod history;
pub mod menu;
pub mod message;
pub mod orders;
pub mod report;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use message::{BusEvent, EventKind, MessageBus};
pub use orders::{Order, OrderManager};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
