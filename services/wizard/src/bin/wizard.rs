//! services/wizard/src/bin/wizard.rs
//!
//! Wires the configuration, adapters and controller together and drives the
//! wizard from a terminal. All policy lives in the controller; this binary
//! only renders screens and forwards user actions.

use async_openai::{config::OpenAIConfig, Client};
use company_profiler_core::{
    domain::{CompanyProfile, Differentiator},
    logo::LogoResolver,
    media,
    uniqueness::CategoryField,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wizard_lib::{
    adapters::{
        BackendLogoAdapter, CompanyBackendAdapter, ImageHostAdapter, OpenAiIntroAdapter,
        OpenAiProfileAdapter, OpenAiUniquenessAdapter, WebSearchAdapter,
    },
    config::Config,
    error::WizardError,
    wizard::{AppState, Screen, WizardController},
};

#[tokio::main]
async fn main() -> Result<(), WizardError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting wizard...");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::new();

    let openai_config = OpenAIConfig::new().with_api_key(
        config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| WizardError::Internal("OPENAI_API_KEY is required".to_string()))?,
    );
    let openai_client = Client::with_config(openai_config);

    let search_adapter = Arc::new(WebSearchAdapter::new(
        http.clone(),
        config.search_api_key.clone(),
        config.search_engine_id.clone(),
    ));
    let profile_adapter = Arc::new(OpenAiProfileAdapter::new(
        openai_client.clone(),
        config.profile_model.clone(),
    ));
    let uniqueness_adapter = Arc::new(OpenAiUniquenessAdapter::new(
        openai_client.clone(),
        config.uniqueness_model.clone(),
    ));
    let intro_adapter = Arc::new(OpenAiIntroAdapter::new(
        openai_client.clone(),
        config.intro_model.clone(),
    ));
    let logo_adapter = Arc::new(BackendLogoAdapter::new(
        http.clone(),
        config.backend_url.clone(),
    ));
    let image_adapter = Arc::new(ImageHostAdapter::new(
        http.clone(),
        config.upload_url.clone(),
        config.upload_preset.clone(),
    ));
    let backend_adapter = Arc::new(CompanyBackendAdapter::new(
        http.clone(),
        config.backend_url.clone(),
    ));

    // --- 3. Build the Shared AppState ---
    let app_state = AppState {
        config: config.clone(),
        search: search_adapter,
        profiles: profile_adapter,
        logos: logo_adapter,
        uniqueness: uniqueness_adapter,
        narrative: intro_adapter,
        images: image_adapter,
        directory: backend_adapter,
    };

    // --- 4. Resolve the owner identity once and run the wizard ---
    let identity = config.owner_identity()?;
    let mut controller = WizardController::new(app_state, identity);
    run_terminal(&mut controller).await
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label} ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn run_terminal(controller: &mut WizardController) -> Result<(), WizardError> {
    loop {
        match controller.screen() {
            Screen::Search => {
                if !search_screen(controller).await? {
                    return Ok(());
                }
            }
            Screen::ProfileReview => profile_screen(controller).await?,
            Screen::UniquenessReview => uniqueness_screen(controller).await?,
            Screen::DifferentiatorSelection => differentiator_screen(controller).await?,
            Screen::Persisted => {
                let id = controller
                    .profile()
                    .and_then(|p| p.id.clone())
                    .unwrap_or_default();
                println!("\nProfile complete. Saved with id {id}.");
                return Ok(());
            }
        }
    }
}

/// Returns `false` when the user quits from the search screen.
async fn search_screen(controller: &mut WizardController) -> Result<bool, WizardError> {
    println!("\n=== Company Profile Search ===");
    if let Some(error) = controller.search_error() {
        println!("! {error}");
    }
    let input = prompt("Search for a company (or 'quit'):")?;
    if input.eq_ignore_ascii_case("quit") {
        return Ok(false);
    }
    controller.search(&input).await;

    while controller.screen() == Screen::Search {
        if let Some(error) = controller.search_error() {
            println!("! {error}");
        }
        if controller.search_results().is_empty() {
            return Ok(true);
        }
        for (index, result) in controller.search_results().iter().enumerate() {
            let resolver = LogoResolver::for_result(result);
            let logo = resolver.current().unwrap_or("(no logo)");
            println!("  [{index}] {}\n      {}\n      logo: {logo}", result.title, result.snippet);
        }
        let choice = prompt("Pick a result to generate a profile (or 'back'):")?;
        if choice.eq_ignore_ascii_case("back") {
            return Ok(true);
        }
        if let Ok(index) = choice.parse::<usize>() {
            controller.select_result(index).await;
        }
    }
    Ok(true)
}

fn print_profile(profile: &CompanyProfile) {
    println!("\n=== {} ===", profile.name);
    if !profile.industry.is_empty() {
        println!("{} — {}", profile.industry, profile.headquarters);
    }
    if !profile.logo.is_empty() {
        println!("logo: {}", profile.logo);
    }
    println!("\nOverview: {}", profile.overview);
    if !profile.mission.is_empty() {
        println!("Mission: {}", profile.mission);
    }
    println!("Values: {}", profile.culture.values.join(", "));
    println!("Benefits: {}", profile.culture.benefits.join(", "));
    println!("Roles: {}", profile.opportunities.roles.join(", "));
    println!("Stack: {}", profile.technology.stack.join(", "));
    println!(
        "Contact: {} | {} | {}",
        profile.contact.email, profile.contact.phone, profile.contact.website
    );
}

async fn profile_screen(controller: &mut WizardController) -> Result<(), WizardError> {
    if let Some(profile) = controller.profile() {
        print_profile(profile);
    }
    if controller.sync_failed() {
        println!("! sync failed — your last change is kept locally");
    }
    let input = prompt("\n[edit <path>] [logo <url>] [upload <file>] [next]:")?;
    let (command, argument) = match input.split_once(' ') {
        Some((c, a)) => (c, a.trim()),
        None => (input.as_str(), ""),
    };
    match command {
        "edit" => {
            if !controller.begin_edit_path(argument) {
                println!("Unknown field path '{argument}'");
                return Ok(());
            }
            let current = controller.editor().buffer().unwrap_or_default().to_string();
            let value = prompt(&format!("New value (was '{current}'):"))?;
            if value.is_empty() {
                controller.discard_edit();
            } else {
                controller.set_edit_buffer(value);
                controller.commit_edit();
            }
        }
        "logo" => {
            if let Err(e) = controller.set_logo_url(argument) {
                println!("! {e}");
            }
        }
        "upload" => {
            let bytes = std::fs::read(argument)?;
            let mime = media::mime_for_file_name(argument).unwrap_or("application/octet-stream");
            if let Err(e) = controller.upload_logo(argument, mime, bytes).await {
                println!("! {e}");
            }
        }
        "next" => controller.advance_to_uniqueness().await,
        _ => {}
    }
    Ok(())
}

async fn uniqueness_screen(controller: &mut WizardController) -> Result<(), WizardError> {
    if let Some(content) = controller.uniqueness() {
        println!("\n=== Why Partner With Us? ===");
        println!("{}\n", content.intro);
        for (index, category) in content.categories.iter().enumerate() {
            println!(
                "  [{index}] {} ({}/5, {})",
                category.title,
                category.score,
                category.icon.name()
            );
            println!("      {}", category.description);
            for detail in &category.details {
                println!("      - {detail}");
            }
        }
    }
    let input = prompt("\n[edit <path>] [regen-intro] [regen-categories] [back] [next]:")?;
    let (command, argument) = match input.split_once(' ') {
        Some((c, a)) => (c, a.trim()),
        None => (input.as_str(), ""),
    };
    match command {
        "edit" => match CategoryField::parse(argument) {
            Some(field) => {
                let value = prompt("New value:")?;
                controller.edit_uniqueness_field(field, value);
            }
            None => println!("Unknown target '{argument}' (try '0.title' or 'intro')"),
        },
        "regen-intro" => controller.regenerate_intro().await,
        "regen-categories" => controller.regenerate_categories().await,
        "back" => controller.back_to_profile(),
        "next" => controller.advance_to_differentiators(),
        _ => {}
    }
    Ok(())
}

async fn differentiator_screen(controller: &mut WizardController) -> Result<(), WizardError> {
    println!("\n=== Select Your Key Differentiators ===");
    for (index, differentiator) in Differentiator::ALL.iter().enumerate() {
        let mark = if controller.is_selected(*differentiator) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{mark}] {index}: {} — {}",
            differentiator.title(),
            differentiator.description()
        );
    }
    let input = prompt("\n[toggle <n>] [back] [save]:")?;
    let (command, argument) = match input.split_once(' ') {
        Some((c, a)) => (c, a.trim()),
        None => (input.as_str(), ""),
    };
    match command {
        "toggle" => {
            if let Some(differentiator) = argument
                .parse::<usize>()
                .ok()
                .and_then(|i| Differentiator::ALL.get(i).copied())
            {
                controller.toggle_differentiator(differentiator);
            }
        }
        "back" => controller.back_to_uniqueness(),
        "save" => {
            if !controller.can_save() {
                println!("Select at least one differentiator before saving.");
                return Ok(());
            }
            controller.save().await;
            if let Some(message) = controller.modal() {
                println!("\n! {message}");
                prompt("Press enter to dismiss.")?;
                controller.dismiss_modal();
            }
        }
        _ => {}
    }
    Ok(())
}
