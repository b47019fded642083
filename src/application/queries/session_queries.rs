//! Session Queries

/// 获取会话快照查询
#[derive(Debug, Clone)]
pub struct GetSession;

/// 列出平台音色查询
#[derive(Debug, Clone)]
pub struct ListVoices;

/// 获取参数选项查询
#[derive(Debug, Clone)]
pub struct GetOptions;
