use axum::Json;
use waypoint_types::api::SuggestedPrompt;

/// Starters offered on the empty conversation screen.
const SUGGESTIONS: [(&str, &str); 3] = [
    (
        "국가 선택하기",
        "해외교육봉사를 진행하기 좋은 국가를 추천해주세요. 우리 팀은 초등학생 교육에 관심이 많습니다.",
    ),
    (
        "일정 계획하기",
        "2주간의 해외교육봉사 일정을 구성하는데 도움을 주세요. 효과적인 프로그램 구성 방법을 알려주세요.",
    ),
    (
        "팀 구성하기",
        "6명의 팀원으로 해외교육봉사를 준비하려고 합니다. 역할 분담과 준비사항을 알려주세요.",
    ),
];

/// GET /api/suggested-prompts
pub async fn list_suggested_prompts() -> Json<Vec<SuggestedPrompt>> {
    Json(
        SUGGESTIONS
            .iter()
            .map(|(title, prompt)| SuggestedPrompt {
                title: title.to_string(),
                prompt: prompt.to_string(),
            })
            .collect(),
    )
}
