// src/session.rs
//! One builder session: the wizard step cursor, the four editors and the
//! autosave task, tied to a single form store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::autosave::{spawn_autosave, AutosaveHandle, DraftManager};
use crate::config::{load_language, BuilderConfig};
use crate::editors::{BasicInfoStep, CertificationsStep, ProjectsStep, SkillsStep};
use crate::form::FormStore;
use crate::preview::{self, PreviewDocument};
use crate::storage::{KeyValueStore, StoreError};
use crate::types::{Draft, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    BasicInfo = 1,
    Projects = 2,
    Skills = 3,
    Certifications = 4,
}

impl Step {
    pub const FIRST: Step = Step::BasicInfo;
    pub const LAST: Step = Step::Certifications;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::BasicInfo),
            2 => Some(Self::Projects),
            3 => Some(Self::Skills),
            4 => Some(Self::Certifications),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Certifications => "Certifications & Awards",
        }
    }
}

pub struct BuilderSession {
    form: Arc<FormStore>,
    drafts: Arc<DraftManager>,
    language: Language,
    step: Step,
    pub basic_info: BasicInfoStep,
    pub projects: ProjectsStep,
    pub skills: SkillsStep,
    pub certifications: CertificationsStep,
    autosave: Option<AutosaveHandle>,
}

impl BuilderSession {
    /// Hydrate from the last snapshot without starting autosave. Used by
    /// one-shot commands that never edit.
    pub fn open(store: Arc<dyn KeyValueStore>, config: &BuilderConfig) -> Self {
        let drafts = Arc::new(DraftManager::new(store.clone()));
        let form = Arc::new(FormStore::new(drafts.load_snapshot()));
        let language = load_language(store.as_ref(), config.locale.as_deref());

        Self {
            form,
            drafts,
            language,
            step: Step::FIRST,
            basic_info: BasicInfoStep,
            projects: ProjectsStep::new(),
            skills: SkillsStep::new(),
            certifications: CertificationsStep::new(),
            autosave: None,
        }
    }

    /// Hydrate and start the autosave loop. Requires a tokio runtime.
    pub fn mount(store: Arc<dyn KeyValueStore>, config: &BuilderConfig) -> Self {
        let mut session = Self::open(store, config);
        session.autosave = Some(spawn_autosave(
            session.drafts.clone(),
            session.form.clone(),
            config.autosave_interval,
        ));
        info!(
            language = %session.language,
            "Builder session mounted for {}",
            session.drafts.draft_id()
        );
        session
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    /// Owned handle on the form, for driving editors while the session is
    /// borrowed mutably.
    pub fn shared_form(&self) -> Arc<FormStore> {
        self.form.clone()
    }

    pub fn drafts(&self) -> &DraftManager {
        &self.drafts
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_autosaving(&self) -> bool {
        self.autosave.as_ref().is_some_and(AutosaveHandle::is_running)
    }

    // ===== Step cursor =====

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn next(&mut self) -> Step {
        if let Some(step) = Step::from_number(self.step.number() + 1) {
            self.step = step;
        }
        self.step
    }

    pub fn prev(&mut self) -> Step {
        if let Some(step) = Step::from_number(self.step.number().saturating_sub(1)) {
            self.step = step;
        }
        self.step
    }

    pub fn go_to(&mut self, step: Step) {
        self.step = step;
    }

    // ===== Drafts and output =====

    pub fn preview(&self) -> PreviewDocument {
        self.form.with(preview::render)
    }

    /// Run one autosave tick right away.
    pub fn flush(&self) -> Result<Draft, StoreError> {
        self.form.with(|portfolio| self.drafts.tick(portfolio))
    }

    /// Load a gallery draft into this session's form. Returns whether the
    /// draft existed.
    pub fn continue_draft(&mut self, id: &str) -> Result<bool, StoreError> {
        match self.drafts.continue_draft(id)? {
            Some(portfolio) => {
                self.form.replace(portfolio);
                self.step = Step::FIRST;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Stop autosave. Dropping the session does the same.
    pub fn unmount(mut self) {
        self.autosave.take();
        info!("Builder session unmounted");
    }
}
