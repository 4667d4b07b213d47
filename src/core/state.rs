//! 服务器状态 - 持有所有服务的共享引用
//!
//! [`ServerState`] 是整个服务的核心数据结构，通过 `Clone` (内部 `Arc`)
//! 注入到每个 handler 与后台任务，取代进程级全局可变状态。

use std::time::Duration;

use serde::Serialize;

use crate::core::config::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::history::HistoryLog;
use crate::menu::MenuService;
use crate::message::{EventKind, MessageBus};
use crate::orders::{ArchiveScheduler, ArchiveService, OrderManager};
use crate::report::ReportWriter;
use crate::utils::AppResult;

/// 服务器状态
///
/// # 服务组件
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | bus | 消息总线 (viewer 扇出) |
/// | orders | 订单生命周期管理 |
/// | menu | 菜单目录 |
/// | history | 历史日志 |
/// | reports | 每日报表 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub bus: MessageBus,
    pub orders: OrderManager,
    pub menu: MenuService,
    pub history: HistoryLog,
    pub reports: ReportWriter,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序：
    /// 1. 确保工作目录结构存在 (data/, reports/)
    /// 2. 加载菜单与历史文件 (缺失或损坏时初始化为空)
    /// 3. 构建消息总线与订单管理器
    pub fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure()?;

        let bus = MessageBus::new();
        let menu = MenuService::load(config.menu_file());
        let history = HistoryLog::load(config.history_file());
        let orders = OrderManager::new(bus.clone(), config.timezone);
        let reports = ReportWriter::new(config.reports_dir());

        if config.admin.pass.is_empty() {
            tracing::warn!("ADMIN_PASS is not set; admin endpoints will reject every request");
        }

        Ok(Self {
            config: config.clone(),
            bus,
            orders,
            menu,
            history,
            reports,
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 HTTP 服务启动前调用。注册的任务：
    /// - 归档调度器 (固定周期触发归档周期)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let service = ArchiveService::new(
            self.orders.clone(),
            self.history.clone(),
            self.reports.clone(),
            self.config.timezone,
        );
        let period = Duration::from_secs(self.config.archive_interval_secs);
        let scheduler = ArchiveScheduler::new(service, period);
        let shutdown = tasks.shutdown_token();
        tasks.spawn("archive_scheduler", TaskKind::Periodic, async move {
            scheduler.run(shutdown).await;
        });
    }

    /// 广播事件到所有连接的 viewer
    ///
    /// 订单事件由 [`OrderManager`] 在生命周期操作内部发布；
    /// 菜单 handler 通过本方法发布 `menu-updated`。
    pub fn broadcast<T: Serialize>(&self, event: EventKind, payload: &T) {
        self.bus.publish(event, payload);
    }

    /// 当前连接的 viewer 数量
    pub fn viewer_count(&self) -> usize {
        self.bus.viewer_count()
    }
}
