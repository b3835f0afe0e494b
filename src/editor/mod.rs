//! Admin editor view-models.
//!
//! Every admin form is a short-lived, explicitly-passed view-model:
//! handlers deserialize a form, run its derivations, and turn it into a
//! persistence payload at submit time. The lifecycle of an open editor
//! is the [`EditorState`] machine; which sub-editor is open on the
//! content screen is the [`SectionEditor`] union, one variant per
//! section with its own typed form state.

pub mod blog;
pub mod contact_form;
pub mod home;
pub mod project;
pub mod testimonial;

pub use blog::BlogArticleForm;
pub use contact_form::{ContactFieldForm, MoveDirection, OrderSwap};
pub use home::{AboutForm, HeroForm, ServiceForm, StatisticForm};
pub use project::ProjectForm;
pub use testimonial::TestimonialForm;

use std::str::FromStr;

/// Lifecycle phase of one editor instance.
///
/// `Idle → Creating → (Submitting → Idle | Error → Creating)`, and the
/// same loop through `Editing(id)` for stored records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Idle,
    Creating,
    Editing(String),
}

/// One open editor: its phase plus the typed form it is editing.
///
/// Only one instance is active per entity type. Starting a create while
/// an edit is open discards the edit outright; local state is
/// last-write-wins, nothing is merged.
#[derive(Clone, Debug, Default)]
pub struct EditorState<F: Default> {
    mode: EditorMode,
    submitting: bool,
    error: Option<String>,
    pub form: F,
}

impl<F: Default> EditorState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Opens a blank create form, discarding whatever was open.
    pub fn start_create(&mut self) {
        self.mode = EditorMode::Creating;
        self.submitting = false;
        self.error = None;
        self.form = F::default();
    }

    /// Opens an edit form populated from a stored record.
    pub fn start_edit(&mut self, id: impl Into<String>, form: F) {
        self.mode = EditorMode::Editing(id.into());
        self.submitting = false;
        self.error = None;
        self.form = form;
    }

    /// Marks the mutation as in flight. Ignored while idle.
    pub fn begin_submit(&mut self) {
        if self.mode != EditorMode::Idle {
            self.submitting = true;
            self.error = None;
        }
    }

    /// A successful mutation closes the editor and resets the form.
    pub fn finish(&mut self) {
        self.mode = EditorMode::Idle;
        self.submitting = false;
        self.error = None;
        self.form = F::default();
    }

    /// A failed mutation keeps the phase and the form contents intact so
    /// the user can correct and resubmit; only the error is new.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    /// Abandons the editor without submitting.
    pub fn cancel(&mut self) {
        self.finish();
    }
}

/// Home-page sections the content screen can edit, in default display
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentSection {
    Hero,
    Statistics,
    About,
    Services,
    Projects,
    Testimonials,
    Blog,
    Contact,
}

impl ContentSection {
    pub const ALL: [ContentSection; 8] = [
        ContentSection::Hero,
        ContentSection::Statistics,
        ContentSection::About,
        ContentSection::Services,
        ContentSection::Projects,
        ContentSection::Testimonials,
        ContentSection::Blog,
        ContentSection::Contact,
    ];

    /// Stable key used in `section_settings.section_key` and URLs.
    pub fn key(self) -> &'static str {
        match self {
            ContentSection::Hero => "hero",
            ContentSection::Statistics => "statistics",
            ContentSection::About => "about",
            ContentSection::Services => "services",
            ContentSection::Projects => "projects",
            ContentSection::Testimonials => "testimonials",
            ContentSection::Blog => "blog",
            ContentSection::Contact => "contact",
        }
    }
}

impl FromStr for ContentSection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentSection::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or(())
    }
}

/// The sub-editor currently open on the admin content screen, one
/// variant per section, each with its own form shape.
#[derive(Clone, Debug)]
pub enum SectionEditor {
    Hero(EditorState<HeroForm>),
    Statistics(EditorState<StatisticForm>),
    About(EditorState<AboutForm>),
    Services(EditorState<ServiceForm>),
    Projects(EditorState<ProjectForm>),
    Testimonials(EditorState<TestimonialForm>),
    Blog(EditorState<BlogArticleForm>),
    Contact(EditorState<ContactFieldForm>),
}

impl SectionEditor {
    /// A fresh, idle editor for the given section.
    pub fn open(section: ContentSection) -> Self {
        match section {
            ContentSection::Hero => SectionEditor::Hero(EditorState::new()),
            ContentSection::Statistics => SectionEditor::Statistics(EditorState::new()),
            ContentSection::About => SectionEditor::About(EditorState::new()),
            ContentSection::Services => SectionEditor::Services(EditorState::new()),
            ContentSection::Projects => SectionEditor::Projects(EditorState::new()),
            ContentSection::Testimonials => SectionEditor::Testimonials(EditorState::new()),
            ContentSection::Blog => SectionEditor::Blog(EditorState::new()),
            ContentSection::Contact => SectionEditor::Contact(EditorState::new()),
        }
    }

    pub fn section(&self) -> ContentSection {
        match self {
            SectionEditor::Hero(_) => ContentSection::Hero,
            SectionEditor::Statistics(_) => ContentSection::Statistics,
            SectionEditor::About(_) => ContentSection::About,
            SectionEditor::Services(_) => ContentSection::Services,
            SectionEditor::Projects(_) => ContentSection::Projects,
            SectionEditor::Testimonials(_) => ContentSection::Testimonials,
            SectionEditor::Blog(_) => ContentSection::Blog,
            SectionEditor::Contact(_) => ContentSection::Contact,
        }
    }
}
