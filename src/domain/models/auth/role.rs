//! 사용자 역할과 라우트별 역할 허용 목록

use std::fmt;
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// MongoDB와 JSON에는 소문자 문자열(`"user"`, `"admin"`)로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// 문자열에서 역할을 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 라우트에 통과를 허용할 역할 목록
///
/// 비어 있으면 인증된 모든 사용자를 허용합니다.
/// 판정은 토큰에 담긴 역할이 아니라 저장소에 있는 *현재* 역할로 합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoles(Vec<Role>);

impl AllowedRoles {
    /// 인증만 요구하는 빈 목록
    pub fn any() -> Self {
        Self(Vec::new())
    }

    pub fn only(roles: &[Role]) -> Self {
        let mut list = Vec::with_capacity(roles.len());
        for role in roles {
            if !list.contains(role) {
                list.push(*role);
            }
        }
        Self(list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn roles(&self) -> &[Role] {
        &self.0
    }

    /// 현재 역할이 목록을 만족하는지 확인
    pub fn is_satisfied(&self, current: Role) -> bool {
        self.0.is_empty() || self.0.contains(&current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse(" user "), Some(Role::User));
        assert_eq!(Role::parse("moderator"), None);
    }

    #[test]
    fn test_empty_allow_list_accepts_everyone() {
        let allowed = AllowedRoles::any();
        assert!(allowed.is_satisfied(Role::User));
        assert!(allowed.is_satisfied(Role::Admin));
    }

    #[test]
    fn test_admin_allow_list() {
        let allowed = AllowedRoles::only(&[Role::Admin, Role::Admin]);
        assert_eq!(allowed.roles(), &[Role::Admin]);
        assert!(allowed.is_satisfied(Role::Admin));
        assert!(!allowed.is_satisfied(Role::User));
    }
}
