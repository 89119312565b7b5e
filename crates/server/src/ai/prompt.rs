use serde_json::{Map, Value};
use shared::{GenerateRequest, Language, Vocabulary};

/// Фиксированные фразы промптов на одном языке
struct PromptText {
    create_layout: &'static str,
    description_label: &'static str,
    previous_header: &'static str,
    feedback_label: &'static str,
    fix_instruction: &'static str,
    answer_only_json: &'static str,
    name_placeholder: &'static str,
    improvements_placeholder: &'static str,
    analyze_intro: &'static str,
    current_plan_label: &'static str,
    check_label: &'static str,
    checks: [&'static str; 4],
    answer_json: &'static str,
    problems_placeholder: &'static str,
    suggestions_placeholder: &'static str,
    next_step_placeholder: &'static str,
}

const FINNISH_TEXT: PromptText = PromptText {
    create_layout: "Luo keittiösuunnitelma JSON-muodossa.",
    description_label: "Käyttäjän kuvaus",
    previous_header: "EDELLINEN VERSIO JA PALAUTE:",
    feedback_label: "Käyttäjän palaute/edellisen version ongelmat:",
    fix_instruction: "Korjaa yllä olevaan keittiöön mainitut ongelmat. Säilytä toimivat osat.",
    answer_only_json: "Vastaa VAIN JSON:",
    name_placeholder: "Keittiön nimi",
    improvements_placeholder: "Mitä parannettiin tähän versioon",
    analyze_intro: "Analysoi tämä keittiön 3D-malli.",
    current_plan_label: "Nykyinen suunnitelma:",
    check_label: "Tarkista:",
    checks: [
        "Toimiiko työkolmio (jääkaappi-liesi-allas)?",
        "Onko tilaa liikkua?",
        "Onko kaapit sijoitettu loogisesti?",
        "Puuttuuko jotain tärkeää?",
    ],
    answer_json: "Vastaa JSON:",
    problems_placeholder: "lista ongelmista",
    suggestions_placeholder: "Mitä pitää muuttaa",
    next_step_placeholder: "Tarkka kuvaus miten korjata",
};

const ENGLISH_TEXT: PromptText = PromptText {
    create_layout: "Create a kitchen plan in JSON format.",
    description_label: "User description",
    previous_header: "PREVIOUS VERSION AND FEEDBACK:",
    feedback_label: "User feedback / problems in the previous version:",
    fix_instruction: "Fix the problems mentioned for the kitchen above. Keep the parts that work.",
    answer_only_json: "Answer with JSON ONLY:",
    name_placeholder: "Kitchen name",
    improvements_placeholder: "What was improved in this version",
    analyze_intro: "Analyze this 3D model of a kitchen.",
    current_plan_label: "Current plan:",
    check_label: "Check:",
    checks: [
        "Does the work triangle (fridge-stove-sink) work?",
        "Is there room to move?",
        "Are the cabinets placed logically?",
        "Is anything important missing?",
    ],
    answer_json: "Answer with JSON:",
    problems_placeholder: "list of problems",
    suggestions_placeholder: "What needs to change",
    next_step_placeholder: "Exact description of how to fix it",
};

fn text_for(language: Language) -> &'static PromptText {
    match language {
        Language::Finnish => &FINNISH_TEXT,
        Language::English => &ENGLISH_TEXT,
    }
}

fn pretty(data: &Map<String, Value>) -> String {
    format!("{:#}", Value::Object(data.clone()))
}

/// Промпт генерации: доработка предыдущей версии или новая планировка
pub fn generate_prompt(request: &GenerateRequest, vocabulary: &Vocabulary) -> String {
    let text = text_for(vocabulary.language);
    let keys = &vocabulary.layout;

    let context = match request.revision() {
        Some((previous, feedback)) => format!(
            "{}\n{}\n\n{}\n{}\n\n{}",
            text.previous_header,
            pretty(previous),
            text.feedback_label,
            feedback,
            text.fix_instruction
        ),
        None => format!("{}: {}", text.description_label, request.description),
    };

    format!(
        r#"{create}

{context}

{answer}

{{
  "{name}": "{name_placeholder}",
  "{iteration}": {next_iteration},
  "{dimensions}": {{"{width}": 4000, "{depth}": 3000, "{height}": 2700}},
  "{improvements}": "{improvements_placeholder}",
  "{cabinets}": [...],
  "{appliances}": [...]
}}
"#,
        create = text.create_layout,
        context = context,
        answer = text.answer_only_json,
        name = keys.name,
        name_placeholder = text.name_placeholder,
        iteration = keys.iteration,
        next_iteration = u64::from(request.iteration) + 1,
        dimensions = keys.dimensions,
        width = keys.dimension_width,
        depth = keys.dimension_depth,
        height = keys.dimension_height,
        improvements = keys.improvements,
        improvements_placeholder = text.improvements_placeholder,
        cabinets = keys.cabinets,
        appliances = keys.appliances,
    )
}

/// Промпт анализа снимка текущей планировки
pub fn analyze_prompt(current_data: &Map<String, Value>, vocabulary: &Vocabulary) -> String {
    let text = text_for(vocabulary.language);
    let keys = &vocabulary.analysis;

    let checks = text
        .checks
        .iter()
        .enumerate()
        .map(|(i, check)| format!("{}. {}", i + 1, check))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{intro}

{plan_label}
{plan}

{check_label}
{checks}

{answer}
{{
  "{feasible}": true/false,
  "{problems}": ["{problems_placeholder}"],
  "{suggestions}": "{suggestions_placeholder}",
  "{next_step}": "{next_step_placeholder}"
}}
"#,
        intro = text.analyze_intro,
        plan_label = text.current_plan_label,
        plan = pretty(current_data),
        check_label = text.check_label,
        checks = checks,
        answer = text.answer_json,
        feasible = keys.feasible,
        problems = keys.problems,
        problems_placeholder = text.problems_placeholder,
        suggestions = keys.suggestions,
        suggestions_placeholder = text.suggestions_placeholder,
        next_step = keys.next_step,
        next_step_placeholder = text.next_step_placeholder,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::vocabulary::{ENGLISH, FINNISH};

    fn request(value: Value) -> GenerateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_fresh_prompt_embeds_description() {
        let req = request(json!({"description": "Pieni L-keittiö", "iteration": 2}));
        let prompt = generate_prompt(&req, &FINNISH);
        assert!(prompt.contains("Käyttäjän kuvaus: Pieni L-keittiö"));
        assert!(prompt.contains(r#""iteraatio": 3"#));
        assert!(prompt.contains(r#""kaapit": [...]"#));
        assert!(!prompt.contains("EDELLINEN VERSIO"));
    }

    #[test]
    fn test_revision_prompt_embeds_previous_and_feedback() {
        let req = request(json!({
            "description": "ignored in revision mode",
            "previous_data": {"name": "Galley", "cabinets": [{"x": 0}]},
            "feedback": "The fridge blocks the door"
        }));
        let prompt = generate_prompt(&req, &ENGLISH);
        assert!(prompt.contains("PREVIOUS VERSION AND FEEDBACK:"));
        assert!(prompt.contains("The fridge blocks the door"));
        assert!(prompt.contains(r#""name": "Galley""#));
        assert!(!prompt.contains("ignored in revision mode"));
        assert!(prompt.contains(r#""iteration": 1"#));
    }

    #[test]
    fn test_feedback_without_previous_is_fresh() {
        let req = request(json!({"description": "Open plan", "feedback": "more light"}));
        let prompt = generate_prompt(&req, &ENGLISH);
        assert!(prompt.contains("User description: Open plan"));
        assert!(!prompt.contains("more light"));
    }

    #[test]
    fn test_previous_data_keeps_non_ascii() {
        let req = request(json!({
            "description": "x",
            "previous_data": {"nimi": "Kesämökin keittiö"},
            "feedback": "Lisää säilytystilaa"
        }));
        let prompt = generate_prompt(&req, &FINNISH);
        assert!(prompt.contains("Kesämökin keittiö"));
    }

    #[test]
    fn test_analyze_prompt() {
        let current = json!({"nimi": "A", "kaapit": []});
        let prompt = analyze_prompt(current.as_object().unwrap(), &FINNISH);
        assert!(prompt.contains("Nykyinen suunnitelma:"));
        assert!(prompt.contains(r#""nimi": "A""#));
        assert!(prompt.contains("1. Toimiiko työkolmio"));
        assert!(prompt.contains("4. Puuttuuko jotain tärkeää?"));
        assert!(prompt.contains(r#""seuraava_askel""#));
    }
}
