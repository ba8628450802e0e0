/// Assistant turn appended to the history when a chat request fails.
pub const CHAT_FAILURE_REPLY: &str = "抱歉，发送消息时出现错误，请稍后重试。";

/// The single user-visible error for every chat transport failure.
pub const CHAT_FAILURE_MESSAGE: &str = "聊天请求失败，请稍后重试";

/// Builds the content sent to the assistant; blank references are ignored.
/// Quoted text is inserted verbatim, braces included.
pub fn compose_user_content(message: &str, referenced: Option<&str>) -> String {
    match referenced.map(str::trim).filter(|r| !r.is_empty()) {
        Some(referenced) => format!("引用内容：{referenced}\n\n问题：{message}"),
        None => message.to_string(),
    }
}
