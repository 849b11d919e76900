//! Prompt construction and the deterministic offline templates.
//!
//! Everything here is a pure function of the request: identical applicant
//! facts always produce identical text, which is what makes the offline
//! fallback safe to show in place of a model response.

use super::{AssistFieldKey, AssistRequest};
use crate::language::{format_currency, SupportedLang};

/// Localized display label of an assisted field.
pub fn field_label(key: AssistFieldKey, lang: SupportedLang) -> &'static str {
    match (key, lang) {
        (AssistFieldKey::CurrentFinancialSituation, SupportedLang::En) => {
            "Current Financial Situation"
        }
        (AssistFieldKey::CurrentFinancialSituation, SupportedLang::Ar) => "الوضع المالي الحالي",
        (AssistFieldKey::EmploymentCircumstances, SupportedLang::En) => "Employment Circumstances",
        (AssistFieldKey::EmploymentCircumstances, SupportedLang::Ar) => "الظروف الوظيفية",
        (AssistFieldKey::ReasonForApplying, SupportedLang::En) => "Reason for Applying",
        (AssistFieldKey::ReasonForApplying, SupportedLang::Ar) => "سبب التقديم",
    }
}

fn employment_label(lang: SupportedLang, value: &str) -> &'static str {
    match (lang, value) {
        (SupportedLang::En, "employed") => "Employed",
        (SupportedLang::En, "unemployed") => "Unemployed",
        (SupportedLang::En, "self-employed") => "Self-employed",
        (SupportedLang::En, "student") => "Student",
        (SupportedLang::En, "retired") => "Retired",
        (SupportedLang::En, _) => "Not specified",
        (SupportedLang::Ar, "employed") => "موظف",
        (SupportedLang::Ar, "unemployed") => "عاطل",
        (SupportedLang::Ar, "self-employed") => "عمل حر",
        (SupportedLang::Ar, "student") => "طالب",
        (SupportedLang::Ar, "retired") => "متقاعد",
        (SupportedLang::Ar, _) => "غير محدد",
    }
}

/// System instruction for the drafting call.
pub fn system_prompt(lang: SupportedLang) -> &'static str {
    match lang {
        SupportedLang::En => {
            "You are a concise assistant that rewrites clearly while preserving facts."
        }
        SupportedLang::Ar => "أنت مساعد مختصر يعيد الصياغة بوضوح ويحافظ على الحقائق.",
    }
}

/// System instruction for the translate-only call: output strictly in the
/// target language, no commentary.
pub fn system_translate_prompt(target: SupportedLang) -> &'static str {
    match target {
        SupportedLang::Ar => "أنت مترجم دقيق. ترجم النص التالي إلى العربية فقط من دون شروحات.",
        SupportedLang::En => {
            "You are a precise translator. Translate into English only with no explanations."
        }
    }
}

pub fn user_translate_prompt(text: &str, target: SupportedLang) -> String {
    match target {
        SupportedLang::Ar => format!("ترجم إلى العربية فقط:\nالنص:\n{text}"),
        SupportedLang::En => format!("Translate to English only:\nText:\n{text}"),
    }
}

/// Prompt drafting new text from applicant facts.
pub fn build_generate_prompt(request: &AssistRequest) -> String {
    let dependents = request.application.family.dependents;
    let income = request.application.family.monthly_income;
    let name = request.application.personal.name.trim();
    let label = field_label(request.field_key, request.language);

    match request.language {
        SupportedLang::Ar => {
            let name_line = if name.is_empty() {
                String::new()
            } else {
                format!(" الاسم: {name}.")
            };
            [
                format!("اكتب فقرة موجزة لحقل \"{label}\" بأسلوب محترم وواضح."),
                format!("عدد المعالين: {dependents}. الدخل الشهري: {income}.{name_line}"),
                "الحد الأقصى 150 كلمة. استخدم نصًا عاديًا فقط.".to_string(),
                "أجب باللغة العربية فقط.".to_string(),
            ]
            .join("\n")
        }
        SupportedLang::En => {
            let name_line = if name.is_empty() {
                String::new()
            } else {
                format!(" Name: {name}.")
            };
            [
                format!("Draft a concise paragraph for \"{label}\" in a respectful, plain tone."),
                format!("Dependents: {dependents}. Monthly income: {income}.{name_line}"),
                "Limit to 150 words. Plain text only.".to_string(),
                "Respond in English only.".to_string(),
            ]
            .join("\n")
        }
    }
}

/// Prompt tightening existing text while preserving its facts.
pub fn build_refine_prompt(request: &AssistRequest, source_text: &str) -> String {
    let label = field_label(request.field_key, request.language);

    match request.language {
        SupportedLang::Ar => [
            format!("حسّن وصغ النص التالي لحقل \"{label}\" مع الحفاظ على الحقائق."),
            "استخدم فقرة أو فقرتين قصيرتين (بحد أقصى 150 كلمة). نص عربي واضح فقط.".to_string(),
            "أعد الإجابة باللغة العربية فقط.".to_string(),
            "النص:".to_string(),
            source_text.to_string(),
        ]
        .join("\n"),
        SupportedLang::En => [
            format!("Improve and tighten the following for \"{label}\" while preserving facts."),
            "Return 1-2 short paragraphs (\u{2264}150 words). Plain text only.".to_string(),
            "Respond in English only.".to_string(),
            "Text:".to_string(),
            source_text.to_string(),
        ]
        .join("\n"),
    }
}

/// Fixed offline paragraph per field and language, substituting applicant
/// facts with locale-correct currency formatting.
pub fn build_offline_template(request: &AssistRequest) -> String {
    let family = &request.application.family;
    let dependents = family.dependents;
    let name = request.application.personal.name.trim();
    let income = format_currency(family.monthly_income, request.language);

    let sentences: Vec<String> = match (request.field_key, request.language) {
        (AssistFieldKey::CurrentFinancialSituation, SupportedLang::En) => vec![
            describe_applicant_en(name, dependents),
            format!(
                "My monthly income is {income}, which no longer covers rent, utilities, and groceries."
            ),
            "I'm cutting expenses where possible but need temporary help to stay current."
                .to_string(),
        ],
        (AssistFieldKey::CurrentFinancialSituation, SupportedLang::Ar) => vec![
            describe_applicant_ar(name, dependents),
            format!("دخلي الشهري هو {income} ولا يكفي لتغطية الإيجار والفواتير والمصاريف الأساسية."),
            "أحاول تقليل المصروفات قدر الإمكان وأحتاج إلى دعم مؤقت للمحافظة على الالتزامات."
                .to_string(),
        ],
        (AssistFieldKey::EmploymentCircumstances, SupportedLang::En) => vec![
            format!(
                "Employment status: {}.",
                employment_label(SupportedLang::En, &family.employment_status)
            ),
            "My hours and income recently changed, making on-time payments harder.".to_string(),
            "I'm actively pursuing more stable work and additional income sources.".to_string(),
        ],
        (AssistFieldKey::EmploymentCircumstances, SupportedLang::Ar) => vec![
            format!(
                "الوضع الوظيفي: {}.",
                employment_label(SupportedLang::Ar, &family.employment_status)
            ),
            "تغيرت ساعات العمل والدخل مؤخرًا مما صعّب سداد الالتزامات في وقتها.".to_string(),
            "أبحث بنشاط عن فرصة عمل أكثر استقرارًا ومصادر دخل إضافية.".to_string(),
        ],
        (AssistFieldKey::ReasonForApplying, SupportedLang::En) => vec![
            "I'm requesting temporary financial assistance to cover essential living costs."
                .to_string(),
            "This support will help bridge the gap until my income stabilizes.".to_string(),
            "I'll use the funds responsibly and keep the organization updated.".to_string(),
        ],
        (AssistFieldKey::ReasonForApplying, SupportedLang::Ar) => vec![
            "أطلب مساعدة مالية مؤقتة لتغطية الاحتياجات الأساسية لأسرتي.".to_string(),
            "سيساعدني هذا الدعم على سد الفجوة حتى يتحسن الدخل.".to_string(),
            "سأستخدم المبلغ بمسؤولية وأبقي الجهة الداعمة على اطلاع.".to_string(),
        ],
    };

    sentences.join(" ")
}

fn describe_applicant_en(name: &str, dependents: f64) -> String {
    let plural = if dependents == 1.0 { "" } else { "s" };
    if name.is_empty() {
        format!("I support {dependents} household member{plural}.")
    } else {
        format!("I am {name} and support {dependents} household member{plural}.")
    }
}

fn describe_applicant_ar(name: &str, dependents: f64) -> String {
    if name.is_empty() {
        format!("أعيل {dependents} فردًا من الأسرة.")
    } else {
        format!("أنا {name} وأعيل {dependents} فردًا من الأسرة.")
    }
}
