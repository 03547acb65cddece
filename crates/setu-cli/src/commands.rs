//! Command implementations for the `setu` binary.
//!
//! The CLI is one of the "view" collaborators the core was designed for: it
//! consults the navigation guard before protected flows and renders the
//! state the controllers expose.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use setu_application::{AuthUseCase, JobDraft, JobPostingUseCase, ProfileUseCase, SignupForm};
use setu_core::config::ClientConfig;
use setu_core::feed::{JobFeedController, JobsGateway, employer_display_name};
use setu_core::guard::{self, RouteDecision, routes};
use setu_core::session::SessionManager;
use setu_core::ClientError;
use setu_infrastructure::{ApiClient, FileStore};
use setu_types::{ProfileUpdate, Role};

pub struct App {
    config: ClientConfig,
    session: Arc<SessionManager>,
    api: Arc<ApiClient>,
}

impl App {
    /// Loads configuration, opens the durable store and restores the
    /// persisted session.
    pub fn bootstrap() -> Result<Self> {
        let data_dir = match std::env::var_os("SETU_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".skillsetu"),
        };

        let mut config = match fs::read_to_string(data_dir.join("config.toml")) {
            Ok(content) => ClientConfig::from_toml(&content)
                .context("Failed to parse config.toml")?,
            Err(_) => ClientConfig::default(),
        }
        .with_env_overrides();
        config.data_dir = Some(data_dir.clone());

        let store = FileStore::new(&data_dir)?;
        let session = Arc::new(SessionManager::new(Arc::new(store)));
        session.restore();

        let api = Arc::new(ApiClient::new(&config, session.clone()).map_err(user_error)?);
        Ok(Self {
            config,
            session,
            api,
        })
    }

    pub async fn signup(
        &self,
        name: String,
        phone: String,
        location: String,
        password: String,
        confirm_password: String,
        role: &str,
    ) -> Result<()> {
        let role = parse_role(role)?;
        let auth = AuthUseCase::new(self.api.clone(), self.session.clone());
        let user = auth
            .register(SignupForm {
                name,
                phone_number: phone,
                location_area: location,
                password,
                confirm_password,
                role,
            })
            .await
            .map_err(user_error)?;
        println!("Account created for {}. Log in with `setu login`.", user.name);
        Ok(())
    }

    pub async fn login(&self, phone: &str, password: &str) -> Result<()> {
        let auth = AuthUseCase::new(self.api.clone(), self.session.clone());
        let user = auth.login(phone, password).await.map_err(user_error)?;
        println!(
            "Logged in as {}. Continue at {}.",
            user.name,
            guard::after_login(None)
        );
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        let auth = AuthUseCase::new(self.api.clone(), self.session.clone());
        auth.logout().map_err(user_error)?;
        println!("Logged out.");
        Ok(())
    }

    pub fn whoami(&self) -> Result<()> {
        if !self.check_route(routes::DASHBOARD) {
            return Ok(());
        }
        let session = self.session.current();
        if let Some(profile) = session.profile {
            println!("{} ({:?})", profile.name, profile.role);
            println!("  phone:    {}", profile.phone_number);
            println!("  location: {}", profile.location_area);
            if let Some(company) = profile.company_name {
                println!("  company:  {company}");
            }
        }
        Ok(())
    }

    pub async fn jobs(&self, query: Option<String>, pages: usize) -> Result<()> {
        if !self.check_route(routes::JOBS) {
            return Ok(());
        }

        let gateway: Arc<dyn JobsGateway> = self.api.clone();
        let controller = JobFeedController::new(gateway, self.config.page_size);

        controller.refresh().await;
        for _ in 1..pages {
            if !controller.state().await.has_more {
                break;
            }
            controller.load_more().await;
        }
        if let Some(query) = query {
            controller.set_query(query).await;
        }

        let state = controller.state().await;
        if let Some(error) = state.error {
            return Err(anyhow!(error));
        }

        let visible = controller.visible().await;
        if visible.is_empty() {
            println!("No jobs found.");
        }
        for job in &visible {
            println!(
                "#{:<5} {} - {} ({})",
                job.id,
                job.display_title(),
                employer_display_name(job),
                job.display_location()
            );
        }
        if state.has_more {
            println!("More listings available; rerun with --pages {}.", pages + 1);
        }
        Ok(())
    }

    pub async fn post_job(
        &self,
        title: String,
        description: String,
        location: String,
        skills: Vec<i64>,
    ) -> Result<()> {
        if !self.check_route(routes::POST_JOB) {
            return Ok(());
        }

        let jobs = JobPostingUseCase::new(self.api.clone(), self.session.clone());
        let created = jobs
            .post(JobDraft {
                title,
                description,
                location_area: location,
                skill_ids: skills,
            })
            .await
            .map_err(user_error)?;
        println!(
            "Job posted: #{} {}. Continue at {}.",
            created.id,
            created.display_title(),
            routes::DASHBOARD
        );
        Ok(())
    }

    pub async fn profile_show(&self) -> Result<()> {
        if !self.check_route(routes::PROFILE) {
            return Ok(());
        }

        let profile_flow = ProfileUseCase::new(self.api.clone(), self.session.clone());
        let (profile, catalog) = profile_flow.load().await.map_err(user_error)?;

        println!("{} ({:?})", profile.name, profile.role);
        println!("  phone:    {}", profile.phone_number);
        println!("  location: {}", profile.location_area);
        if let Some(company) = &profile.company_name {
            println!("  company:  {company}");
        }
        let names: Vec<&str> = profile.skills.iter().map(|s| s.name.as_str()).collect();
        println!("  skills:   {}", names.join(", "));
        println!("{} skills available in the catalog.", catalog.len());
        Ok(())
    }

    pub async fn profile_update(
        &self,
        name: Option<String>,
        phone: Option<String>,
        location: Option<String>,
        company: Option<String>,
    ) -> Result<()> {
        if !self.check_route(routes::PROFILE) {
            return Ok(());
        }

        let profile_flow = ProfileUseCase::new(self.api.clone(), self.session.clone());
        let updated = profile_flow
            .update_basic(ProfileUpdate {
                name,
                phone_number: phone,
                location_area: location,
                company_name: company,
            })
            .await
            .map_err(user_error)?;
        println!("Profile updated for {}.", updated.name);
        Ok(())
    }

    pub async fn profile_skills(&self, ids: Vec<i64>) -> Result<()> {
        if !self.check_route(routes::PROFILE) {
            return Ok(());
        }

        let profile_flow = ProfileUseCase::new(self.api.clone(), self.session.clone());
        let updated = profile_flow.update_skills(ids).await.map_err(user_error)?;
        let names: Vec<&str> = updated.skills.iter().map(|s| s.name.as_str()).collect();
        println!("Skills updated: {}", names.join(", "));
        Ok(())
    }

    /// Consults the navigation guard; prints the redirect decision and
    /// returns false when the route may not render.
    fn check_route(&self, requested: &str) -> bool {
        match guard::check(&self.session.current(), requested) {
            RouteDecision::Allow => true,
            RouteDecision::Redirect { to, remembered } => {
                println!(
                    "Please log in first (`setu login`); {to} will forward you back to {remembered}."
                );
                false
            }
        }
    }
}

fn parse_role(raw: &str) -> Result<Role> {
    match raw.trim().to_lowercase().as_str() {
        "seeker" => Ok(Role::Seeker),
        "employer" => Ok(Role::Employer),
        other => Err(anyhow!("unknown role {other:?}; expected seeker or employer")),
    }
}

fn user_error(err: ClientError) -> anyhow::Error {
    anyhow!(err.user_message())
}
