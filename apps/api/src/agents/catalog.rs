//! Agent Catalog — the static registry behind the dashboard.
//!
//! Navigation is an explicit [`View`] computed from the caller's selection.
//! Nothing here holds mutable state.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    MessageGenerator,
    ErrorAnalyzer,
    CodeReviewer,
    TaskPlanner,
    DocumentSummarizer,
}

impl AgentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::MessageGenerator => "message_generator",
            AgentId::ErrorAnalyzer => "error_analyzer",
            AgentId::CodeReviewer => "code_reviewer",
            AgentId::TaskPlanner => "task_planner",
            AgentId::DocumentSummarizer => "document_summarizer",
        }
    }

    /// Accepts both `snake_case` ids and the `kebab-case` form used in URLs.
    pub fn parse(raw: &str) -> Option<AgentId> {
        let normalized = raw.trim().replace('-', "_");
        AGENTS
            .iter()
            .map(|a| a.id)
            .find(|id| id.as_str() == normalized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgentStatus {
    Active,
    #[serde(rename = "Coming Soon")]
    ComingSoon,
    Planned,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentDescriptor {
    pub id: AgentId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub status: AgentStatus,
}

/// Every agent shown on the dashboard, in display order.
pub const AGENTS: &[AgentDescriptor] = &[
    AgentDescriptor {
        id: AgentId::MessageGenerator,
        name: "Message Generator Agent",
        description: "Generate professional referral request messages from job posting content",
        icon: "📧",
        category: "Communication",
        status: AgentStatus::Active,
    },
    AgentDescriptor {
        id: AgentId::ErrorAnalyzer,
        name: "Error Analyzer Agent",
        description: "Analyze and debug code errors with intelligent suggestions",
        icon: "🔍",
        category: "Development",
        status: AgentStatus::Active,
    },
    AgentDescriptor {
        id: AgentId::CodeReviewer,
        name: "Code Reviewer Agent",
        description: "Review code quality, suggest improvements and best practices",
        icon: "📝",
        category: "Development",
        status: AgentStatus::Planned,
    },
    AgentDescriptor {
        id: AgentId::TaskPlanner,
        name: "Task Planner Agent",
        description: "Smart task planning and productivity optimization",
        icon: "📅",
        category: "Productivity",
        status: AgentStatus::Planned,
    },
    AgentDescriptor {
        id: AgentId::DocumentSummarizer,
        name: "Document Summarizer Agent",
        description: "Summarize long documents and extract key insights",
        icon: "📄",
        category: "Analysis",
        status: AgentStatus::Planned,
    },
];

pub fn descriptor(id: AgentId) -> Option<&'static AgentDescriptor> {
    AGENTS.iter().find(|a| a.id == id)
}

/// What the shell should present for a given selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    MessageGenerator,
    ErrorAnalyzer,
    /// Known agent that is not active yet.
    Unavailable(AgentId),
}

impl View {
    pub fn for_selection(selected: Option<AgentId>) -> View {
        let Some(id) = selected else {
            return View::Dashboard;
        };
        match descriptor(id).map(|a| a.status) {
            Some(AgentStatus::Active) => match id {
                AgentId::MessageGenerator => View::MessageGenerator,
                AgentId::ErrorAnalyzer => View::ErrorAnalyzer,
                other => View::Unavailable(other),
            },
            _ => View::Unavailable(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub coming_soon: usize,
    pub planned: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: &'static str,
    pub agents: Vec<AgentDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub categories: Vec<CategoryGroup>,
}

/// Stats plus agents grouped by category, categories in first-seen order.
pub fn dashboard() -> Dashboard {
    let count = |status: AgentStatus| AGENTS.iter().filter(|a| a.status == status).count();
    let stats = DashboardStats {
        total: AGENTS.len(),
        active: count(AgentStatus::Active),
        coming_soon: count(AgentStatus::ComingSoon),
        planned: count(AgentStatus::Planned),
    };

    let mut categories: Vec<CategoryGroup> = Vec::new();
    for agent in AGENTS {
        match categories.iter_mut().find(|g| g.category == agent.category) {
            Some(group) => group.agents.push(agent.clone()),
            None => categories.push(CategoryGroup {
                category: agent.category,
                agents: vec![agent.clone()],
            }),
        }
    }

    Dashboard { stats, categories }
}
