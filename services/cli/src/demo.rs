use std::sync::Arc;

use clap::Args;
use intake_ai::config::AppConfig;
use intake_ai::language::SupportedLang;
use intake_ai::storage::KeyValueStore;
use intake_ai::workflows::intake::{
    ApplicationRef, ApplicationState, ApplicationStepper, AssistFieldKey, AssistRequest,
    DraftStore, KeyTranslator, LocaleContext, StepKey, SubmissionForm,
};
use tracing::info;

use crate::error::AppError;
use crate::infra;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Language the demo drafts narrative text in (en or ar)
    #[arg(long, default_value = "en")]
    pub(crate) language: String,
    /// Leave the demo submission in the store instead of cleaning it up
    #[arg(long)]
    pub(crate) keep: bool,
}

fn sample_form() -> SubmissionForm {
    SubmissionForm {
        name: "Omar Khalid".to_string(),
        national_id: "784-1985-7654321".to_string(),
        date_of_birth: "1985-11-02".to_string(),
        gender: "male".to_string(),
        address: "44 Al Wasl Road".to_string(),
        city: "Dubai".to_string(),
        state: "Dubai".to_string(),
        country: "United Arab Emirates".to_string(),
        phone: "0501234567".to_string(),
        email: "omar.khalid@example.com".to_string(),
        marital_status: "married".to_string(),
        dependents: "2".to_string(),
        employment_status: "unemployed".to_string(),
        monthly_income: "500".to_string(),
        housing_status: "rented".to_string(),
        financial_situation: String::new(),
        employment_circumstance: String::new(),
        reason_for_applying: String::new(),
    }
}

pub(crate) async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let language = SupportedLang::parse_or_default(&args.language);
    let infra = infra::build(config);

    println!("== intake demo ==");
    println!(
        "assist: {}",
        if infra.assist.is_online() {
            "remote completion configured"
        } else {
            "offline templates (no credential)"
        }
    );

    let locale = LocaleContext::new(language, Arc::new(KeyTranslator));
    let drafts = DraftStore::new(Arc::clone(&infra.kv) as Arc<dyn KeyValueStore>);
    let mut stepper = ApplicationStepper::new(
        Arc::clone(&infra.submissions),
        drafts,
        locale,
        ApplicationRef::New,
        None,
    );

    let form = sample_form();
    for &field in StepKey::Personal.fields() {
        stepper.set_value(field, form.value(field));
    }
    advance(&mut stepper);
    for &field in StepKey::Financial.fields() {
        stepper.set_value(field, form.value(field));
    }
    advance(&mut stepper);

    // draft the three narrative fields through the assist pipeline
    let application = ApplicationState::from_form(stepper.values());
    for key in AssistFieldKey::ALL {
        let request = AssistRequest::generate(key, application.clone(), language);
        let draft = infra.assist.generate(&request).await;
        println!("\n[{:?}]\n{draft}", key);
        stepper.set_value(key.target_field(), draft);
    }

    let receipt = stepper.submit()?;
    info!(id = %receipt.submission.id, "demo application submitted");
    println!("\nsubmitted: {}", receipt.submission.to_row().id_tail);
    println!("stored at: {}", infra.kv.path().display());

    if !args.keep {
        use intake_ai::workflows::intake::SubmissionStore;
        infra.submissions.remove(&receipt.submission.id)?;
        println!("demo submission removed (pass --keep to retain it)");
    }

    Ok(())
}

fn advance<S: intake_ai::workflows::intake::SubmissionStore>(stepper: &mut ApplicationStepper<S>) {
    if stepper.next() {
        info!(step = stepper.current_step().label(), "advanced to step");
    } else {
        tracing::warn!(
            step = stepper.current_step().label(),
            "demo data failed step validation"
        );
    }
}
