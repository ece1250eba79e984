//! Task-graph construction from a sufficient profile.
//!
//! Runs at most once per session: the orchestrator caches the result on the
//! session and skips this stage on re-entrant turns.

use crate::profile::{MoveProfile, TriState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
}

/// Execution channel for a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Gov24,
    LocalGov,
    Sinmungo,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One checklist item. Immutable within a session once the graph is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNode {
    pub task_id: String,
    pub title: String,
    pub priority: Priority,
    #[serde(default)]
    pub mandatory: bool,
    pub route: Route,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub requires_hitl: bool,
    #[serde(default)]
    pub trigger_conditions: Vec<String>,
    #[serde(default)]
    pub required_inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Builds the prioritized checklist for a move. P0 tasks are unconditional;
/// child- and vehicle-related tasks are added from the profile flags.
pub fn build_task_graph(profile: &MoveProfile) -> Vec<TaskNode> {
    let mut tasks = vec![
        TaskNode {
            task_id: "task_001".to_string(),
            title: "전입신고".to_string(),
            priority: Priority::P0,
            mandatory: true,
            route: Route::Gov24,
            risk_level: RiskLevel::High,
            requires_hitl: true,
            trigger_conditions: Vec::new(),
            required_inputs: vec!["move_date".to_string(), "to_region.sido".to_string()],
            outputs: vec!["전입신고_완료".to_string()],
            depends_on: Vec::new(),
        },
        TaskNode {
            task_id: "task_002".to_string(),
            title: "건강보험 주소 변경".to_string(),
            priority: Priority::P0,
            mandatory: true,
            route: Route::Gov24,
            risk_level: RiskLevel::Medium,
            requires_hitl: false,
            trigger_conditions: Vec::new(),
            required_inputs: vec!["to_region.sido".to_string()],
            outputs: vec!["건강보험_주소_변경완료".to_string()],
            depends_on: vec!["task_001".to_string()],
        },
    ];

    if profile.has_children == TriState::Yes {
        tasks.push(TaskNode {
            task_id: "task_003".to_string(),
            title: "자녀 전학/취학 신고".to_string(),
            priority: Priority::P1,
            mandatory: false,
            route: Route::LocalGov,
            risk_level: RiskLevel::Medium,
            requires_hitl: false,
            trigger_conditions: vec!["has_children=yes".to_string()],
            required_inputs: vec!["to_region.sgg".to_string()],
            outputs: vec!["전학_신고_완료".to_string()],
            depends_on: vec!["task_001".to_string()],
        });
    }

    if profile.vehicles.car == TriState::Yes {
        tasks.push(TaskNode {
            task_id: "task_004".to_string(),
            title: "자동차 변경등록 (주소)".to_string(),
            priority: Priority::P1,
            mandatory: false,
            route: Route::Gov24,
            risk_level: RiskLevel::Medium,
            requires_hitl: false,
            trigger_conditions: vec!["vehicles.car=yes".to_string()],
            required_inputs: vec!["to_region.sido".to_string()],
            outputs: vec!["차량_주소_변경완료".to_string()],
            depends_on: vec!["task_001".to_string()],
        });
    }

    tasks.push(TaskNode {
        task_id: "task_005".to_string(),
        title: "우편물 주거이전 서비스 신청".to_string(),
        priority: Priority::P1,
        mandatory: false,
        route: Route::Offline,
        risk_level: RiskLevel::Low,
        requires_hitl: false,
        trigger_conditions: Vec::new(),
        required_inputs: vec!["to_region.sido".to_string()],
        outputs: vec!["우편물_전송_신청완료".to_string()],
        depends_on: Vec::new(),
    });

    tasks.push(TaskNode {
        task_id: "task_006".to_string(),
        title: "대형폐기물 배출 신고".to_string(),
        priority: Priority::P2,
        mandatory: false,
        route: Route::LocalGov,
        risk_level: RiskLevel::Low,
        requires_hitl: false,
        trigger_conditions: Vec::new(),
        required_inputs: vec!["to_region.sgg".to_string()],
        outputs: vec!["폐기물_스티커_발급".to_string()],
        depends_on: Vec::new(),
    });

    tasks
}
