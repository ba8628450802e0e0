//! Fixtures and an in-memory backend shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend_client::{BackendError, BackendHealth, ResumeBackend};
use crate::models::chat::{ChatReply, ChatRequest};
use crate::models::resume::{
    BasicInfo, Certificate, Education, ParsedResume, ResumeDocument, Skill, Suggestion,
    WorkExperience,
};
use crate::suggestions::field_path::FieldPath;

pub fn suggestion(field: &str, current: &str, suggested: &str, reason: &str) -> Suggestion {
    Suggestion {
        field: FieldPath::from(field),
        current: current.to_string(),
        suggested: suggested.to_string(),
        reason: reason.to_string(),
    }
}

/// Resume with suggestions on `basics`, `work[0]` and `skills[0]`.
pub fn sample_resume() -> ResumeDocument {
    let summary = "经验丰富的软件工程师，专注于后端开发和系统架构";
    ResumeDocument {
        basics: BasicInfo {
            name: "张三".to_string(),
            email: "zhangsan@example.com".to_string(),
            phone: Some("13800138000".to_string()),
            location: Some("北京".to_string()),
            summary: Some(summary.to_string()),
            suggestions: vec![
                suggestion(
                    "basics.summary",
                    summary,
                    "5年经验的高级软件工程师，专注于大规模分布式系统后端开发和微服务架构设计",
                    "添加具体年限、更专业的技术描述和核心能力",
                ),
                suggestion("basics.location", "北京", "北京（可远程）", "说明工作方式"),
            ],
        },
        education: vec![Education {
            institution: "北京大学".to_string(),
            degree: "学士".to_string(),
            field_of_study: "计算机科学".to_string(),
            start_date: "2014-09".to_string(),
            end_date: Some("2018-06".to_string()),
            gpa: None,
            suggestions: vec![],
        }],
        work: vec![WorkExperience {
            company: "某电商公司".to_string(),
            position: "后端工程师".to_string(),
            start_date: "2018-07".to_string(),
            end_date: None,
            description: "负责电商平台后端开发".to_string(),
            achievements: vec!["优化接口性能".to_string(), "主导订单系统重构".to_string()],
            suggestions: vec![suggestion(
                "work[0].description",
                "负责电商平台后端开发",
                "负责电商平台后端开发，通过微服务架构优化，提升系统响应速度30%，支持日活用户100万+",
                "量化工作成果",
            )],
        }],
        skills: vec![
            Skill {
                name: "Rust".to_string(),
                level: Some("高级".to_string()),
                category: Some("编程语言".to_string()),
                suggestions: vec![suggestion("skills[0].level", "高级", "精通", "突出熟练程度")],
            },
            Skill {
                name: "PostgreSQL".to_string(),
                level: None,
                category: Some("数据库".to_string()),
                suggestions: vec![],
            },
        ],
        certificates: vec![Certificate {
            name: "AWS Solutions Architect".to_string(),
            issuer: "Amazon".to_string(),
            date: "2021-05".to_string(),
            description: None,
            suggestions: vec![],
        }],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeFailure {
    /// 4xx: the backend refused the request.
    Rejected,
    /// 5xx: the backend or the network broke.
    Transport,
}

impl FakeFailure {
    fn error(self) -> BackendError {
        match self {
            FakeFailure::Rejected => BackendError::Status {
                status: 400,
                message: "Field not found".to_string(),
            },
            FakeFailure::Transport => BackendError::Status {
                status: 503,
                message: "Service unavailable".to_string(),
            },
        }
    }
}

#[derive(Default)]
struct FakeState {
    resume: Option<ResumeDocument>,
    parse_result: Option<ParsedResume>,
    chat_reply: Option<ChatReply>,
    accept_failure: Option<FakeFailure>,
    chat_failure: Option<FakeFailure>,
    parse_failure: Option<FakeFailure>,
    fetch_count: usize,
    parse_inputs: Vec<String>,
    accept_calls: Vec<(FieldPath, String)>,
    chat_requests: Vec<ChatRequest>,
}

/// In-memory stand-in for the backend. Accepts apply `ResumeDocument::set`
/// to the stored resume, the way the real backend does.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_resume(resume: ResumeDocument) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().resume = Some(resume);
        backend
    }

    pub fn clear_resume(&self) {
        self.state.lock().unwrap().resume = None;
    }

    pub fn fail_accepts(&self, failure: FakeFailure) {
        self.state.lock().unwrap().accept_failure = Some(failure);
    }

    pub fn fail_chat(&self, failure: FakeFailure) {
        self.state.lock().unwrap().chat_failure = Some(failure);
    }

    pub fn fail_parse(&self, failure: FakeFailure) {
        self.state.lock().unwrap().parse_failure = Some(failure);
    }

    pub fn set_parse_result(&self, parsed: ParsedResume) {
        self.state.lock().unwrap().parse_result = Some(parsed);
    }

    pub fn set_chat_reply(&self, reply: ChatReply) {
        self.state.lock().unwrap().chat_reply = Some(reply);
    }

    pub fn stored_resume(&self) -> Option<ResumeDocument> {
        self.state.lock().unwrap().resume.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetch_count
    }

    pub fn parse_inputs(&self) -> Vec<String> {
        self.state.lock().unwrap().parse_inputs.clone()
    }

    pub fn accept_calls(&self) -> Vec<(FieldPath, String)> {
        self.state.lock().unwrap().accept_calls.clone()
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.state.lock().unwrap().chat_requests.clone()
    }
}

#[async_trait]
impl ResumeBackend for FakeBackend {
    async fn fetch_resume(&self) -> Result<Option<ResumeDocument>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_count += 1;
        Ok(state.resume.clone())
    }

    async fn parse_resume(&self, raw_text: &str) -> Result<ParsedResume, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.parse_inputs.push(raw_text.to_string());
        if let Some(failure) = state.parse_failure {
            return Err(failure.error());
        }
        let parsed = state.parse_result.clone().unwrap_or_else(|| ParsedResume {
            resume: sample_resume(),
            suggestions: vec![],
        });
        state.resume = Some(parsed.resume.clone());
        Ok(parsed)
    }

    async fn accept_suggestion(
        &self,
        field: &FieldPath,
        suggested: &str,
    ) -> Result<ResumeDocument, BackendError> {
        let mut state = self.state.lock().unwrap();
        state
            .accept_calls
            .push((field.clone(), suggested.to_string()));
        if let Some(failure) = state.accept_failure {
            return Err(failure.error());
        }
        let current = state.resume.as_ref().ok_or(BackendError::Status {
            status: 404,
            message: "No resume found".to_string(),
        })?;
        let updated = current
            .set(field, suggested)
            .map_err(|e| BackendError::Status {
                status: 400,
                message: e.to_string(),
            })?;
        state.resume = Some(updated.clone());
        Ok(updated)
    }

    async fn save_resume(&self, resume: &ResumeDocument) -> Result<(), BackendError> {
        self.state.lock().unwrap().resume = Some(resume.clone());
        Ok(())
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.chat_requests.push(request.clone());
        if let Some(failure) = state.chat_failure {
            return Err(failure.error());
        }
        Ok(state.chat_reply.clone().unwrap_or(ChatReply {
            reply: "您好！我是您的简历优化助手。".to_string(),
            suggestion: None,
            action: None,
        }))
    }

    async fn health(&self) -> Result<BackendHealth, BackendError> {
        Ok(BackendHealth {
            status: "healthy".to_string(),
            service: "fake-backend".to_string(),
        })
    }
}
