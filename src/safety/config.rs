use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Denylist driving the safety classifier, kept as configuration data so
/// the keyword set can be extended and tested independently of the
/// classification logic.
///
/// `text_categories` maps a semantic category to the substrings matched
/// against an element's combined display text + accessibility label.
/// `identifier_terms` is the shorter infrastructural list matched against
/// the element's identifier string, which catches icon-only controls that
/// carry no visible text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DenylistConfig {
    pub text_categories: BTreeMap<String, Vec<String>>,
    pub identifier_terms: Vec<String>,
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for DenylistConfig {
    fn default() -> Self {
        let mut text_categories = BTreeMap::new();

        text_categories.insert(
            "sessionTermination".to_string(),
            terms(&[
                "logout",
                "log out",
                "log-out",
                "로그아웃",
                "로그 아웃",
                "sign out",
                "signout",
                "sign-out",
                "사인아웃",
                "로그아웃하기",
                "로그아웃 하기",
            ]),
        );

        text_categories.insert(
            "destructive".to_string(),
            terms(&[
                "delete",
                "삭제",
                "제거",
                "삭제하기",
                "remove",
                "탈퇴",
                "탈퇴하기",
                "uninstall",
                "언인스톨",
                "clear",
                "초기화",
                "clear data",
            ]),
        );

        text_categories.insert(
            "reset".to_string(),
            terms(&["reset", "리셋", "재설정"]),
        );

        text_categories.insert(
            "navigationExit".to_string(),
            terms(&[
                "exit", "종료", "나가기", "exit app", "quit", "닫기", "close",
            ]),
        );

        // Both polarities are blocked on purpose: tapping either side of a
        // dialog can commit a destructive flow.
        text_categories.insert(
            "confirmation".to_string(),
            terms(&[
                "cancel",
                "취소",
                "confirm",
                "확인",
                "확인하기",
                "yes",
                "네",
                "예",
                "okay",
                "ok",
                "오케이",
                "승인",
                "agree",
                "동의",
                "동의합니다",
                "accept",
                "수락",
            ]),
        );

        text_categories.insert(
            "accountSurfaces".to_string(),
            terms(&[
                "setting",
                "설정",
                "환경설정",
                "settings",
                "profile",
                "프로필",
                "내 정보",
                "my info",
                "account",
                "계정",
                "계정 관리",
                "account setting",
            ]),
        );

        text_categories.insert(
            "membership".to_string(),
            terms(&[
                "withdraw",
                "회원탈퇴",
                "회원 탈퇴",
                "leave",
                "leave group",
                "unsubscribe",
                "구독 취소",
            ]),
        );

        text_categories.insert(
            "committing".to_string(),
            terms(&[
                "done",
                "완료",
                "finish",
                "apply",
                "적용",
                "적용하기",
                "save",
                "저장",
                "저장하기",
                "change",
                "변경",
                "변경하기",
                "edit",
                "수정",
                "편집",
            ]),
        );

        Self {
            text_categories,
            identifier_terms: terms(&[
                "logout", "signout", "delete", "remove", "account", "setting",
            ]),
        }
    }
}

impl DenylistConfig {
    /// Iterator over every text substring across all categories.
    pub fn text_terms(&self) -> impl Iterator<Item = &str> {
        self.text_categories
            .values()
            .flat_map(|list| list.iter().map(String::as_str))
    }
}
