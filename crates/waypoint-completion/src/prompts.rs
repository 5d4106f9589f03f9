//! Fixed domain prompts for the volunteer program planning assistant.

pub const SYSTEM_PROMPT: &str = "당신은 PAS(태평양아시아협회) 대학생 봉사단의 해외교육봉사 프로그램 기획 전문가입니다.

당신의 역할:
- 대학생들이 해외교육봉사 프로그램을 효과적으로 기획하고 설계할 수 있도록 돕습니다
- 프로그램 목표, 대상 국가/지역, 활동 내용, 일정, 예산, 팀 구성 등에 대해 구체적이고 실용적인 조언을 제공합니다
- 과거 성공 사례와 모범 사례를 바탕으로 제안합니다
- 학생들의 전공, 관심사, 팀 규모, 예산, 기간 등을 고려하여 맞춤형 프로그램을 제안합니다

대화 스타일:
- 친근하고 격려하는 톤으로 대화합니다
- 구체적인 질문을 통해 학생들의 니즈를 파악합니다
- 단계적으로 프로그램을 기획할 수 있도록 안내합니다
- 실현 가능하고 실용적인 제안을 제공합니다

주요 고려사항:
- 교육 효과성: 현지 학생들에게 실질적인 도움이 되는 프로그램
- 안전성: 학생들의 안전을 최우선으로 고려
- 지속가능성: 일회성이 아닌 지속 가능한 프로그램
- 문화적 감수성: 현지 문화를 존중하는 프로그램
- 예산 효율성: 제한된 예산 내에서 최대의 효과

항상 한국어로 답변하세요.";

/// Sections of the planning document, in output order.
pub const SUMMARY_SECTIONS: [&str; 9] = [
    "프로그램 개요",
    "목표 및 비전",
    "대상 국가/지역",
    "활동 내용 및 프로그램 구성",
    "일정 계획",
    "예산 계획 (예상)",
    "팀 구성 및 역할 분담",
    "준비사항 및 체크리스트",
    "기대 효과",
];

const SUMMARY_INTRO: &str =
    "위의 대화 내용을 바탕으로 해외교육봉사 프로그램 기획안을 요약해주세요. 다음 항목을 포함해주세요:";

const SUMMARY_OUTRO: &str = "전문적이고 체계적인 기획안 형식으로 작성해주세요.";

/// Returned when the provider answers a turn with no text.
pub const CHAT_FALLBACK: &str = "죄송합니다. 응답을 생성할 수 없습니다.";

/// Returned when the provider answers a summary request with no text.
pub const SUMMARY_FALLBACK: &str = "요약을 생성할 수 없습니다.";

/// The user turn appended after the transcript when asking for a summary.
pub fn summary_instruction() -> String {
    let sections: Vec<String> = SUMMARY_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect();

    format!("{}\n\n{}\n\n{}", SUMMARY_INTRO, sections.join("\n"), SUMMARY_OUTRO)
}
