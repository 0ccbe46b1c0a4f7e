//! Interactive TUI wizard for publishing a PG listing
//!
//! This module provides the step-by-step guided flow that walks an owner
//! through composing a listing:
//!
//! 1. Basic info (name, location, category, contact)
//! 2. Sharing & rent
//! 3. Amenities & surroundings
//! 4. Pricing & media
//! 5. Preview & publish
//!
//! # Architecture
//!
//! - `WizardState`: Core state machine managing step progression, the draft
//!   and validation errors
//! - `Step`: The five fixed steps of the flow
//! - `StepScreen`: Per-step UI state (focus, cursors, input buffers)
//! - `WizardOutcome`: Final output, either a draft ready to submit or a quit
//!
//! # Key Features
//!
//! - Forward transitions gated by per-step validation with inline errors
//! - Backward and preview-jump transitions always allowed
//! - The draft is only ever mutated through typed patches
//! - Edit-mode hydration runs at most once per wizard instance
//! - Quit confirmation dialog with overlay
//! - Panic-safe terminal cleanup

use std::io::{stdout, Stdout};
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Terminal,
};

use crate::api::{ApiError, ListingRecord};
use crate::listing::{
    amenity_label, validate_step, Category, DraftPatch, ImageEntry, ListingDraft, PreferredFor,
    SharingKind, ValidationErrors, AMENITY_CATALOG,
};

// ============================================================================
// Core Result Types
// ============================================================================

/// Result of wizard execution
#[derive(Debug, Clone)]
pub enum WizardOutcome {
    /// User reached the preview and chose to publish
    Submit(Box<ListingDraft>),
    /// User quit the wizard
    Quit,
}

/// Whether the wizard creates a fresh listing or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { id: u64, user_id: u64 },
}

// ============================================================================
// Step Definitions
// ============================================================================

/// The five fixed wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    BasicInfo,
    SharingRent,
    Amenities,
    PricingMedia,
    Preview,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::BasicInfo,
        Step::SharingRent,
        Step::Amenities,
        Step::PricingMedia,
        Step::Preview,
    ];

    /// 1-based position shown in the step header
    pub fn position(&self) -> usize {
        match self {
            Step::BasicInfo => 1,
            Step::SharingRent => 2,
            Step::Amenities => 3,
            Step::PricingMedia => 4,
            Step::Preview => 5,
        }
    }

    /// Get the display title for this step
    pub fn title(&self) -> &'static str {
        match self {
            Step::BasicInfo => "Basic Info",
            Step::SharingRent => "Sharing & Rent",
            Step::Amenities => "Amenities & Surroundings",
            Step::PricingMedia => "Pricing & Media",
            Step::Preview => "Preview & Publish",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Which pane of the amenities step has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmenityPane {
    Amenities,
    Nearby,
}

/// Per-step UI state (focus position and input buffers)
#[derive(Debug, Clone)]
pub enum StepScreen {
    BasicInfo {
        field: usize,
    },
    SharingRent {
        row: usize,
    },
    Amenities {
        pane: AmenityPane,
        cursor: usize,
        place_input: String,
    },
    PricingMedia {
        field: usize,
        image_input: String,
    },
    Preview {
        selected: usize,
    },
}

impl StepScreen {
    fn fresh(step: Step) -> Self {
        match step {
            Step::BasicInfo => StepScreen::BasicInfo { field: 0 },
            Step::SharingRent => StepScreen::SharingRent { row: 0 },
            Step::Amenities => StepScreen::Amenities {
                pane: AmenityPane::Amenities,
                cursor: 0,
                place_input: String::new(),
            },
            Step::PricingMedia => StepScreen::PricingMedia {
                field: 0,
                image_input: String::new(),
            },
            Step::Preview => StepScreen::Preview { selected: 0 },
        }
    }
}

// ============================================================================
// Action Types
// ============================================================================

/// Action to take after handling an event
#[derive(Debug, Clone)]
pub enum StepAction {
    /// Attempt a validated move to the next step
    NextStep,
    /// Move to the previous step
    PrevStep,
    /// Jump directly to a step by 1-based position (no validation)
    JumpTo(usize),
    /// User wants to quit
    Quit,
    /// Stay on current step
    Stay,
    /// Complete wizard with result
    Complete(WizardOutcome),
}

// ============================================================================
// Wizard State Machine
// ============================================================================

/// Main wizard state machine
pub struct WizardState {
    /// Create or edit flow
    pub mode: WizardMode,
    /// The draft being composed; only mutated through [`WizardState::update`]
    pub draft: ListingDraft,
    /// Validation errors from the last blocked forward transition
    pub errors: ValidationErrors,
    /// Server-side rejection shown on the preview step
    pub remote_error: Option<String>,
    /// Current step index into [`Step::ALL`]
    pub current_index: usize,
    /// Per-step UI state, parallel to [`Step::ALL`]
    pub screens: Vec<StepScreen>,
    /// Set once hydration has been attempted; never cleared
    pub hydrated: bool,
    /// Show quit confirmation dialog
    pub show_quit_confirm: bool,
}

impl WizardState {
    pub fn new(mode: WizardMode) -> Self {
        Self {
            mode,
            draft: ListingDraft::new(),
            errors: ValidationErrors::new(),
            remote_error: None,
            current_index: 0,
            screens: Step::ALL.iter().map(|s| StepScreen::fresh(*s)).collect(),
            hydrated: false,
            show_quit_confirm: false,
        }
    }

    pub fn current_step(&self) -> Step {
        Step::ALL[self.current_index]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index == Step::ALL.len() - 1
    }

    /// Merge a typed patch into the draft
    pub fn update(&mut self, patch: DraftPatch) {
        self.draft.apply(patch);
    }

    /// Validated forward transition: advances only when the current step's
    /// validator passes, otherwise records the errors and stays put.
    pub fn next(&mut self) {
        let errors = validate_step(self.current_step(), &self.draft);
        if errors.is_empty() {
            self.errors.clear();
            if self.current_index < Step::ALL.len() - 1 {
                self.current_index += 1;
            }
        } else {
            self.errors = errors;
        }
    }

    /// Backward transition, always allowed, floored at the first step.
    pub fn prev(&mut self) {
        self.errors.clear();
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Jump to a step by 1-based position without validating. Used by the
    /// preview step's section shortcuts.
    pub fn go_to(&mut self, position: usize) {
        self.errors.clear();
        self.current_index = position.saturating_sub(1).min(Step::ALL.len() - 1);
    }

    /// Load an existing listing into the draft, at most once per wizard.
    ///
    /// The guard flag is set before the fetch runs, so a failed fetch is
    /// terminal for this wizard instance: a later call will not refetch and
    /// cannot clobber anything the user typed in the meantime. Returns
    /// whether the fetch actually ran.
    pub fn hydrate<F>(&mut self, fetch: F) -> Result<bool, ApiError>
    where
        F: FnOnce() -> Result<ListingRecord, ApiError>,
    {
        if self.hydrated {
            return Ok(false);
        }
        self.hydrated = true;
        let record = fetch()?;
        self.draft = record.into_draft();
        Ok(true)
    }

    /// Record a recoverable server rejection and return to the preview step.
    pub fn set_remote_error(&mut self, message: String) {
        self.remote_error = Some(message);
        self.go_to(Step::Preview.position());
    }
}

// ============================================================================
// Terminal Setup/Teardown
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    // Install panic hook for clean terminal restoration
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

// ============================================================================
// Entry Point
// ============================================================================

/// Run the wizard interface until the user publishes or quits.
///
/// Takes the state by reference so a recoverable submit failure can re-enter
/// the same wizard with the draft and preview position intact.
pub fn run_wizard(wizard: &mut WizardState) -> Result<WizardOutcome> {
    let mut terminal = setup_terminal()?;
    let result = run_wizard_loop(&mut terminal, wizard);
    teardown_terminal();
    result
}

// ============================================================================
// Event Loop
// ============================================================================

fn run_wizard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    wizard: &mut WizardState,
) -> Result<WizardOutcome> {
    loop {
        terminal.draw(|f| render_wizard(f, wizard))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not release
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Handle quit confirmation overlay first
                if wizard.show_quit_confirm {
                    match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            return Ok(WizardOutcome::Quit);
                        }
                        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                            wizard.show_quit_confirm = false;
                        }
                        _ => {}
                    }
                    continue;
                }

                // Esc asks for confirmation; plain chars are field input here
                if key.code == KeyCode::Esc {
                    wizard.show_quit_confirm = true;
                    continue;
                }

                let action = handle_step_event(wizard, key);

                match action {
                    StepAction::NextStep => wizard.next(),
                    StepAction::PrevStep => wizard.prev(),
                    StepAction::JumpTo(position) => wizard.go_to(position),
                    StepAction::Quit => wizard.show_quit_confirm = true,
                    StepAction::Complete(result) => return Ok(result),
                    StepAction::Stay => {}
                }
            }
        }
    }
}

fn handle_step_event(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    match wizard.current_step() {
        Step::BasicInfo => handle_basic_info(wizard, key),
        Step::SharingRent => handle_sharing_rent(wizard, key),
        Step::Amenities => handle_amenities(wizard, key),
        Step::PricingMedia => handle_pricing_media(wizard, key),
        Step::Preview => handle_preview(wizard, key),
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

/// Field order on the basic info step
const BASIC_FIELD_COUNT: usize = 10;

/// Error-map key for a basic info field, if it has one
fn basic_error_key(field: usize) -> Option<&'static str> {
    match field {
        0 => Some("pg_name"),
        1 => Some("address"),
        2 => Some("city"),
        3 => Some("area"),
        4 => Some("category"),
        5 => Some("preferred_for"),
        6 => Some("phone_number"),
        8 => Some("whatsapp_number"),
        9 => Some("map_location"),
        _ => None,
    }
}

fn basic_text_value(draft: &ListingDraft, field: usize) -> Option<&str> {
    match field {
        0 => Some(&draft.pg_name),
        1 => Some(&draft.address),
        2 => Some(&draft.city),
        3 => Some(&draft.area),
        6 => Some(&draft.phone_number),
        8 => Some(&draft.whatsapp_number),
        9 => Some(&draft.map_location),
        _ => None,
    }
}

fn basic_text_patch(field: usize, value: String) -> DraftPatch {
    let mut patch = DraftPatch::default();
    match field {
        0 => patch.pg_name = Some(value),
        1 => patch.address = Some(value),
        2 => patch.city = Some(value),
        3 => patch.area = Some(value),
        6 => patch.phone_number = Some(value),
        8 => patch.whatsapp_number = Some(value),
        9 => patch.map_location = Some(value),
        _ => {}
    }
    patch
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> T {
    match current {
        None => {
            if forward {
                all[0]
            } else {
                all[all.len() - 1]
            }
        }
        Some(value) => {
            let index = all.iter().position(|v| *v == value).unwrap_or(0);
            let next = if forward {
                (index + 1) % all.len()
            } else {
                (index + all.len() - 1) % all.len()
            };
            all[next]
        }
    }
}

fn handle_basic_info(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    let field = match wizard.screens[wizard.current_index] {
        StepScreen::BasicInfo { field } => field,
        _ => return StepAction::Stay,
    };

    match key.code {
        KeyCode::Up => {
            if let StepScreen::BasicInfo { field } = &mut wizard.screens[wizard.current_index] {
                *field = field.saturating_sub(1);
            }
            StepAction::Stay
        }
        KeyCode::Down | KeyCode::Tab => {
            if let StepScreen::BasicInfo { field } = &mut wizard.screens[wizard.current_index] {
                if *field < BASIC_FIELD_COUNT - 1 {
                    *field += 1;
                }
            }
            StepAction::Stay
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key.code == KeyCode::Right;
            match field {
                4 => {
                    let next = cycle(&Category::ALL, wizard.draft.category, forward);
                    wizard.update(DraftPatch {
                        category: Some(next),
                        ..Default::default()
                    });
                }
                5 => {
                    let next = cycle(&PreferredFor::ALL, wizard.draft.preferred_for, forward);
                    wizard.update(DraftPatch {
                        preferred_for: Some(next),
                        ..Default::default()
                    });
                }
                7 => {
                    wizard.update(DraftPatch {
                        same_as_phone: Some(!wizard.draft.same_as_phone),
                        ..Default::default()
                    });
                }
                _ => {}
            }
            StepAction::Stay
        }
        KeyCode::Char(' ') if matches!(field, 4 | 5 | 7) => {
            handle_basic_info(
                wizard,
                KeyEvent::new(KeyCode::Right, key.modifiers),
            )
        }
        KeyCode::Char(c) => {
            if let Some(current) = basic_text_value(&wizard.draft, field) {
                let mut value = current.to_string();
                value.push(c);
                wizard.update(basic_text_patch(field, value));
            }
            StepAction::Stay
        }
        KeyCode::Backspace => {
            if let Some(current) = basic_text_value(&wizard.draft, field) {
                if !current.is_empty() {
                    let mut value = current.to_string();
                    value.pop();
                    wizard.update(basic_text_patch(field, value));
                }
            }
            StepAction::Stay
        }
        KeyCode::Enter => StepAction::NextStep,
        _ => StepAction::Stay,
    }
}

fn handle_sharing_rent(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    let row = match wizard.screens[wizard.current_index] {
        StepScreen::SharingRent { row } => row,
        _ => return StepAction::Stay,
    };
    let kind = SharingKind::ALL[row];

    match key.code {
        KeyCode::Up => {
            if let StepScreen::SharingRent { row } = &mut wizard.screens[wizard.current_index] {
                *row = row.saturating_sub(1);
            }
            StepAction::Stay
        }
        KeyCode::Down | KeyCode::Tab => {
            if let StepScreen::SharingRent { row } = &mut wizard.screens[wizard.current_index] {
                if *row < SharingKind::ALL.len() - 1 {
                    *row += 1;
                }
            }
            StepAction::Stay
        }
        KeyCode::Char(' ') => {
            let mut sharing = wizard.draft.sharing.clone();
            if let Some(entry) = sharing.get_mut(&kind) {
                entry.enabled = !entry.enabled;
            }
            wizard.update(DraftPatch {
                sharing: Some(sharing),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let mut sharing = wizard.draft.sharing.clone();
            if let Some(entry) = sharing.get_mut(&kind) {
                entry.rent.push(c);
            }
            wizard.update(DraftPatch {
                sharing: Some(sharing),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Backspace => {
            let mut sharing = wizard.draft.sharing.clone();
            let emptied = match sharing.get_mut(&kind) {
                Some(entry) if !entry.rent.is_empty() => {
                    entry.rent.pop();
                    false
                }
                _ => true,
            };
            if emptied {
                return StepAction::PrevStep;
            }
            wizard.update(DraftPatch {
                sharing: Some(sharing),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Enter => StepAction::NextStep,
        _ => StepAction::Stay,
    }
}

fn handle_amenities(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    let (pane, cursor) = match &wizard.screens[wizard.current_index] {
        StepScreen::Amenities { pane, cursor, .. } => (*pane, *cursor),
        _ => return StepAction::Stay,
    };

    match key.code {
        KeyCode::Tab => {
            if let StepScreen::Amenities { pane, .. } = &mut wizard.screens[wizard.current_index] {
                *pane = match pane {
                    AmenityPane::Amenities => AmenityPane::Nearby,
                    AmenityPane::Nearby => AmenityPane::Amenities,
                };
            }
            StepAction::Stay
        }
        KeyCode::Up if pane == AmenityPane::Amenities => {
            if let StepScreen::Amenities { cursor, .. } = &mut wizard.screens[wizard.current_index]
            {
                *cursor = cursor.saturating_sub(1);
            }
            StepAction::Stay
        }
        KeyCode::Down if pane == AmenityPane::Amenities => {
            if let StepScreen::Amenities { cursor, .. } = &mut wizard.screens[wizard.current_index]
            {
                if *cursor < AMENITY_CATALOG.len() - 1 {
                    *cursor += 1;
                }
            }
            StepAction::Stay
        }
        KeyCode::Char(' ') if pane == AmenityPane::Amenities => {
            let (id, _) = AMENITY_CATALOG[cursor];
            let mut amenities = wizard.draft.amenities.clone();
            if !amenities.remove(id) {
                amenities.insert(id.to_string());
            }
            wizard.update(DraftPatch {
                amenities: Some(amenities),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Char(c) if pane == AmenityPane::Nearby => {
            if let StepScreen::Amenities { place_input, .. } =
                &mut wizard.screens[wizard.current_index]
            {
                place_input.push(c);
            }
            StepAction::Stay
        }
        KeyCode::Backspace if pane == AmenityPane::Nearby => {
            if let StepScreen::Amenities { place_input, .. } =
                &mut wizard.screens[wizard.current_index]
            {
                if place_input.is_empty() {
                    return StepAction::PrevStep;
                }
                place_input.pop();
            }
            StepAction::Stay
        }
        KeyCode::Backspace => StepAction::PrevStep,
        KeyCode::Delete if pane == AmenityPane::Nearby => {
            let mut places = wizard.draft.nearby_places.clone();
            places.pop();
            wizard.update(DraftPatch {
                nearby_places: Some(places),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Enter => {
            if pane == AmenityPane::Nearby {
                let input = match &mut wizard.screens[wizard.current_index] {
                    StepScreen::Amenities { place_input, .. } => std::mem::take(place_input),
                    _ => String::new(),
                };
                let trimmed = input.trim();
                if !trimmed.is_empty() {
                    let mut places = wizard.draft.nearby_places.clone();
                    places.push(trimmed.to_string());
                    wizard.update(DraftPatch {
                        nearby_places: Some(places),
                        ..Default::default()
                    });
                    return StepAction::Stay;
                }
            }
            StepAction::NextStep
        }
        _ => StepAction::Stay,
    }
}

/// Field order on the pricing & media step
const PRICING_FIELD_COUNT: usize = 5;

fn handle_pricing_media(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    let field = match &wizard.screens[wizard.current_index] {
        StepScreen::PricingMedia { field, .. } => *field,
        _ => return StepAction::Stay,
    };

    match key.code {
        KeyCode::Up => {
            if let StepScreen::PricingMedia { field, .. } =
                &mut wizard.screens[wizard.current_index]
            {
                *field = field.saturating_sub(1);
            }
            StepAction::Stay
        }
        KeyCode::Down | KeyCode::Tab => {
            if let StepScreen::PricingMedia { field, .. } =
                &mut wizard.screens[wizard.current_index]
            {
                if *field < PRICING_FIELD_COUNT - 1 {
                    *field += 1;
                }
            }
            StepAction::Stay
        }
        KeyCode::Char(' ') if field == 2 => {
            wizard.update(DraftPatch {
                refundable_on_exit: Some(!wizard.draft.refundable_on_exit),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Char(c) => {
            match field {
                0 if c.is_ascii_digit() => {
                    let mut value = wizard.draft.security_deposit.clone();
                    value.push(c);
                    wizard.update(DraftPatch {
                        security_deposit: Some(value),
                        ..Default::default()
                    });
                }
                1 if c.is_ascii_digit() => {
                    let mut value = wizard.draft.notice_period.clone();
                    value.push(c);
                    wizard.update(DraftPatch {
                        notice_period: Some(value),
                        ..Default::default()
                    });
                }
                3 => {
                    if let StepScreen::PricingMedia { image_input, .. } =
                        &mut wizard.screens[wizard.current_index]
                    {
                        image_input.push(c);
                    }
                }
                4 => {
                    let mut value = wizard.draft.youtube_link.clone();
                    value.push(c);
                    wizard.update(DraftPatch {
                        youtube_link: Some(value),
                        ..Default::default()
                    });
                }
                _ => {}
            }
            StepAction::Stay
        }
        KeyCode::Backspace => {
            match field {
                0 if !wizard.draft.security_deposit.is_empty() => {
                    let mut value = wizard.draft.security_deposit.clone();
                    value.pop();
                    wizard.update(DraftPatch {
                        security_deposit: Some(value),
                        ..Default::default()
                    });
                }
                1 if !wizard.draft.notice_period.is_empty() => {
                    let mut value = wizard.draft.notice_period.clone();
                    value.pop();
                    wizard.update(DraftPatch {
                        notice_period: Some(value),
                        ..Default::default()
                    });
                }
                3 => {
                    if let StepScreen::PricingMedia { image_input, .. } =
                        &mut wizard.screens[wizard.current_index]
                    {
                        if image_input.is_empty() {
                            return StepAction::PrevStep;
                        }
                        image_input.pop();
                    }
                }
                4 if !wizard.draft.youtube_link.is_empty() => {
                    let mut value = wizard.draft.youtube_link.clone();
                    value.pop();
                    wizard.update(DraftPatch {
                        youtube_link: Some(value),
                        ..Default::default()
                    });
                }
                _ => return StepAction::PrevStep,
            }
            StepAction::Stay
        }
        KeyCode::Delete if field == 3 => {
            let mut images = wizard.draft.images.clone();
            images.pop();
            wizard.update(DraftPatch {
                images: Some(images),
                ..Default::default()
            });
            StepAction::Stay
        }
        KeyCode::Enter => {
            if field == 3 {
                let input = match &mut wizard.screens[wizard.current_index] {
                    StepScreen::PricingMedia { image_input, .. } => std::mem::take(image_input),
                    _ => String::new(),
                };
                let trimmed = input.trim();
                if !trimmed.is_empty() {
                    let mut images = wizard.draft.images.clone();
                    images.push(ImageEntry::Pending(PathBuf::from(trimmed)));
                    wizard.update(DraftPatch {
                        images: Some(images),
                        ..Default::default()
                    });
                    return StepAction::Stay;
                }
            }
            StepAction::NextStep
        }
        _ => StepAction::Stay,
    }
}

/// Preview entries: the four editable sections plus the publish action
const PREVIEW_ENTRY_COUNT: usize = 5;

fn handle_preview(wizard: &mut WizardState, key: KeyEvent) -> StepAction {
    let selected = match wizard.screens[wizard.current_index] {
        StepScreen::Preview { selected } => selected,
        _ => return StepAction::Stay,
    };

    match key.code {
        KeyCode::Up => {
            if let StepScreen::Preview { selected } = &mut wizard.screens[wizard.current_index] {
                *selected = selected.saturating_sub(1);
            }
            StepAction::Stay
        }
        KeyCode::Down | KeyCode::Tab => {
            if let StepScreen::Preview { selected } = &mut wizard.screens[wizard.current_index] {
                if *selected < PREVIEW_ENTRY_COUNT - 1 {
                    *selected += 1;
                }
            }
            StepAction::Stay
        }
        KeyCode::Enter => {
            if selected < PREVIEW_ENTRY_COUNT - 1 {
                // Jump back into a section without re-validating on the way
                StepAction::JumpTo(selected + 1)
            } else {
                StepAction::Complete(WizardOutcome::Submit(Box::new(wizard.draft.clone())))
            }
        }
        KeyCode::Backspace => StepAction::PrevStep,
        _ => StepAction::Stay,
    }
}

// ============================================================================
// Rendering Helpers
// ============================================================================

/// Create a centered rectangle with fixed dimensions
fn centered_fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Get semantic color for a step
fn step_color(step: Step) -> Color {
    match step {
        Step::BasicInfo => Color::Cyan,
        Step::SharingRent => Color::Yellow,
        Step::Amenities => Color::Magenta,
        Step::PricingMedia => Color::Yellow,
        Step::Preview => Color::Green,
    }
}

// ============================================================================
// Main Rendering Functions
// ============================================================================

/// Render the complete wizard UI with persistent shell layout
fn render_wizard(f: &mut Frame, wizard: &WizardState) {
    let area = f.area();

    let logo_height = 9u16;
    let hint_height = 1u16;

    let box_width = 66u16;
    let ideal_box_height = 24u16;
    let box_height =
        ideal_box_height.min(area.height.saturating_sub(logo_height + hint_height + 2));

    // Center the whole unit vertically
    let total_height = logo_height + box_height + hint_height;
    let x = area.width.saturating_sub(box_width) / 2;
    let y = area.height.saturating_sub(total_height) / 2;

    let logo_area = Rect::new(x, y, box_width.min(area.width), logo_height);
    render_logo(f, logo_area);

    let box_y = y + logo_height;
    let box_area = Rect::new(x, box_y, box_width.min(area.width), box_height.max(10));
    f.render_widget(Clear, box_area);

    let step = wizard.current_step();
    let color = step_color(step);

    let title_text = format!(
        " Step {}/{} \u{00b7} {} ",
        step.position(),
        Step::ALL.len(),
        step.title()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title_text)
        .title_style(Style::default().fg(color).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    render_step(f, inner, wizard);

    // Mode indicator on bottom border (right); skipped when the terminal is
    // too narrow for the tag to sit inside the border
    if let WizardMode::Edit { id, .. } = wizard.mode {
        let tag = format!(" editing #{} ", id);
        let tag_len = tag.len() as u16;
        if tag_len.saturating_add(2) <= box_area.width {
            let tag_area = Rect::new(
                box_area.x + box_area.width - tag_len - 1,
                box_area.y + box_area.height.saturating_sub(1),
                tag_len,
                1,
            );
            f.render_widget(
                Paragraph::new(Span::styled(tag, Style::default().fg(Color::DarkGray))),
                tag_area,
            );
        }
    }

    let hint_y = box_area.y + box_area.height;
    let hint_area = Rect::new(x, hint_y, box_width.min(area.width), 1);
    render_help_bar(f, hint_area, wizard);

    if wizard.show_quit_confirm {
        render_quit_confirm_overlay(f);
    }
}

/// Render logo
fn render_logo(f: &mut Frame, area: Rect) {
    let logo_lines = vec![
        Line::from(Span::styled(
            "██████╗  ██████╗ ███╗   ██╗███████╗███████╗████████╗",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "██╔══██╗██╔════╝ ████╗  ██║██╔════╝██╔════╝╚══██╔══╝",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "██████╔╝██║  ███╗██╔██╗ ██║█████╗  ███████╗   ██║   ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "██╔═══╝ ██║   ██║██║╚██╗██║██╔══╝  ╚════██║   ██║   ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "██║     ╚██████╔╝██║ ╚████║███████╗███████║   ██║   ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "╚═╝      ╚═════╝ ╚═╝  ╚═══╝╚══════╝╚══════╝   ╚═╝   ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("⌂ ", Style::default().fg(Color::Magenta).bold()),
            Span::styled(
                "Publish your PG in five steps",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let logo_paragraph = Paragraph::new(logo_lines).alignment(Alignment::Center);
    f.render_widget(logo_paragraph, area);
}

/// Render the current step inside the shell box
fn render_step(f: &mut Frame, area: Rect, wizard: &WizardState) {
    match wizard.current_step() {
        Step::BasicInfo => render_basic_info(f, area, wizard),
        Step::SharingRent => render_sharing_rent(f, area, wizard),
        Step::Amenities => render_amenities(f, area, wizard),
        Step::PricingMedia => render_pricing_media(f, area, wizard),
        Step::Preview => render_preview(f, area, wizard),
    }
}

/// Render help bar with context-appropriate shortcuts
fn render_help_bar(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let step = wizard.current_step();
    let mut spans = vec![];

    if wizard.is_last_step() {
        spans.push(Span::styled("  Enter", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            " publish/edit  ",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled("  Enter", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            " next  ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if matches!(step, Step::SharingRent | Step::Amenities) {
        spans.push(Span::styled("Space", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            " toggle  ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if step == Step::Amenities {
        spans.push(Span::styled("Tab", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            " switch pane  ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if wizard.current_index > 0 {
        spans.push(Span::styled("Bksp", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            " delete/back  ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled("Esc", Style::default().fg(Color::Cyan)));
    spans.push(Span::styled(" quit", Style::default().fg(Color::DarkGray)));

    let help_line = Line::from(spans);
    let paragraph = Paragraph::new(help_line).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Render quit confirmation overlay
fn render_quit_confirm_overlay(f: &mut Frame) {
    let popup = centered_fixed_rect(44, 8, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Discard Listing? ")
        .title_style(Style::default().fg(Color::Red).bold())
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quit and lose unsaved changes?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("      ", Style::default()),
            Span::styled("Y", Style::default().fg(Color::Cyan)),
            Span::styled(" yes  ", Style::default().fg(Color::DarkGray)),
            Span::styled("N", Style::default().fg(Color::Cyan)),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    f.render_widget(Paragraph::new(content), inner);
}

// ============================================================================
// Step Renderers
// ============================================================================

/// One labeled field line with optional inline error
fn field_line<'a>(
    label: &'a str,
    value: String,
    focused: bool,
    color: Color,
    error: Option<&'a str>,
) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(color).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if focused {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(format!("  {:<18}", label), label_style),
        Span::styled(value, value_style),
    ];
    if focused {
        spans.push(Span::styled("\u{258c}", Style::default().fg(color)));
    }
    if let Some(message) = error {
        spans.push(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn render_basic_info(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let field = match wizard.screens[wizard.current_index] {
        StepScreen::BasicInfo { field } => field,
        _ => return,
    };
    let color = step_color(Step::BasicInfo);
    let draft = &wizard.draft;

    let labels = [
        "PG name",
        "Address",
        "City",
        "Area",
        "Category",
        "Preferred tenants",
        "Phone",
        "WhatsApp = phone",
        "WhatsApp",
        "Map link",
    ];

    let mut lines = vec![Line::from("")];
    for (i, label) in labels.iter().enumerate() {
        let value = match i {
            4 => draft
                .category
                .map(|c| format!("\u{2039} {} \u{203a}", c.label()))
                .unwrap_or_else(|| "\u{2039} select \u{203a}".to_string()),
            5 => draft
                .preferred_for
                .map(|p| format!("\u{2039} {} \u{203a}", p.label()))
                .unwrap_or_else(|| "\u{2039} select \u{203a}".to_string()),
            7 => {
                if draft.same_as_phone {
                    "[x] yes".to_string()
                } else {
                    "[ ] no".to_string()
                }
            }
            8 => {
                if draft.same_as_phone {
                    format!("{} (mirrored)", draft.phone_number)
                } else {
                    draft.whatsapp_number.clone()
                }
            }
            _ => basic_text_value(draft, i).unwrap_or_default().to_string(),
        };
        let error = basic_error_key(i).and_then(|key| wizard.errors.get(key).map(String::as_str));
        lines.push(field_line(label, value, i == field, color, error));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_sharing_rent(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let row = match wizard.screens[wizard.current_index] {
        StepScreen::SharingRent { row } => row,
        _ => return,
    };
    let color = step_color(Step::SharingRent);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Which sharing types does your PG offer?",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if let Some(message) = wizard.errors.get("sharing") {
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    for (i, kind) in SharingKind::ALL.iter().enumerate() {
        let entry = &wizard.draft.sharing[kind];
        let checkbox = if entry.enabled { "[x]" } else { "[ ]" };
        let focused = i == row;
        let style = if focused {
            Style::default().fg(Color::Black).bg(color).bold()
        } else if entry.enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let rent_text = if entry.enabled {
            format!("  \u{20b9} {}", entry.rent)
        } else {
            String::new()
        };
        let mut spans = vec![Span::styled(
            format!("  {} {:<16}{}", checkbox, kind.label(), rent_text),
            style,
        )];
        if focused && entry.enabled {
            spans.push(Span::styled("\u{258c}", Style::default().fg(color)));
        }
        if let Some(message) = wizard.errors.get(&format!("rent_{}", kind.key())) {
            spans.push(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_amenities(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let (pane, cursor, place_input) = match &wizard.screens[wizard.current_index] {
        StepScreen::Amenities {
            pane,
            cursor,
            place_input,
        } => (*pane, *cursor, place_input),
        _ => return,
    };
    let color = step_color(Step::Amenities);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    // Left pane: amenity checklist
    let amenity_border = if pane == AmenityPane::Amenities {
        Style::default().fg(color)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let amenity_block = Block::default()
        .borders(Borders::ALL)
        .border_style(amenity_border)
        .title(" Amenities ")
        .title_style(amenity_border);
    let amenity_inner = amenity_block.inner(chunks[0]);
    f.render_widget(amenity_block, chunks[0]);

    let max_visible = amenity_inner.height as usize;
    let start_idx = if cursor >= max_visible && max_visible > 0 {
        cursor - max_visible + 1
    } else {
        0
    };

    let items: Vec<ListItem> = AMENITY_CATALOG
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(max_visible.max(1))
        .map(|(i, (id, label))| {
            let checked = wizard.draft.amenities.contains(*id);
            let checkbox = if checked { "[x]" } else { "[ ]" };
            let style = if i == cursor && pane == AmenityPane::Amenities {
                Style::default().fg(Color::Black).bg(color).bold()
            } else if checked {
                Style::default().fg(color)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {} {}", checkbox, label)).style(style)
        })
        .collect();
    let list = List::new(items);
    let mut list_state = ListState::default();
    list_state.select(Some(cursor.saturating_sub(start_idx)));
    f.render_stateful_widget(list, amenity_inner, &mut list_state);

    // Right pane: nearby places with an input line
    let nearby_border = if pane == AmenityPane::Nearby {
        Style::default().fg(color)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let nearby_block = Block::default()
        .borders(Borders::ALL)
        .border_style(nearby_border)
        .title(" Nearby Places ")
        .title_style(nearby_border);
    let nearby_inner = nearby_block.inner(chunks[1]);
    f.render_widget(nearby_block, chunks[1]);

    let mut lines = vec![Line::from(vec![
        Span::styled(" Add: ", Style::default().fg(Color::DarkGray)),
        Span::styled(place_input.clone(), Style::default().fg(Color::White)),
        Span::styled(
            "\u{258c}",
            if pane == AmenityPane::Nearby {
                Style::default().fg(color)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
    ])];
    lines.push(Line::from(""));
    for place in &wizard.draft.nearby_places {
        lines.push(Line::from(Span::styled(
            format!(" \u{2022} {}", place),
            Style::default().fg(Color::White),
        )));
    }
    f.render_widget(Paragraph::new(lines), nearby_inner);
}

fn render_pricing_media(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let (field, image_input) = match &wizard.screens[wizard.current_index] {
        StepScreen::PricingMedia { field, image_input } => (*field, image_input),
        _ => return,
    };
    let color = step_color(Step::PricingMedia);
    let draft = &wizard.draft;

    let mut lines = vec![Line::from("")];

    lines.push(field_line(
        "Security deposit",
        format!("\u{20b9} {}", draft.security_deposit),
        field == 0,
        color,
        wizard.errors.get("security_deposit").map(String::as_str),
    ));
    lines.push(field_line(
        "Notice period",
        format!("{} days", draft.notice_period),
        field == 1,
        color,
        wizard.errors.get("notice_period").map(String::as_str),
    ));
    lines.push(field_line(
        "Refundable",
        if draft.refundable_on_exit {
            "[x] yes".to_string()
        } else {
            "[ ] no".to_string()
        },
        field == 2,
        color,
        None,
    ));
    lines.push(field_line(
        "Add photo (path)",
        image_input.clone(),
        field == 3,
        color,
        wizard.errors.get("images").map(String::as_str),
    ));
    lines.push(field_line(
        "YouTube link",
        draft.youtube_link.clone(),
        field == 4,
        color,
        wizard.errors.get("youtube_link").map(String::as_str),
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Photos ({}):", draft.images.len()),
        Style::default().fg(Color::DarkGray).bold(),
    )));
    for entry in &draft.images {
        let marker = if entry.is_pending() { "new" } else { "saved" };
        lines.push(Line::from(Span::styled(
            format!("    \u{2022} {} ({})", entry.display_name(), marker),
            Style::default().fg(Color::White),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_preview(f: &mut Frame, area: Rect, wizard: &WizardState) {
    let selected = match wizard.screens[wizard.current_index] {
        StepScreen::Preview { selected } => selected,
        _ => return,
    };
    let color = step_color(Step::Preview);
    let draft = &wizard.draft;

    let sharing: Vec<String> = draft
        .enabled_sharing()
        .map(|(kind, entry)| format!("{} \u{20b9}{}", kind.label(), entry.rent))
        .collect();
    let amenities: Vec<&str> = draft.amenities.iter().map(|id| amenity_label(id)).collect();

    let sections: [(&str, String); 4] = [
        (
            "Basic info",
            format!(
                "{} \u{00b7} {}, {} \u{00b7} {}",
                draft.pg_name,
                draft.area,
                draft.city,
                draft
                    .category
                    .map(|c| c.label())
                    .unwrap_or("no category")
            ),
        ),
        (
            "Sharing & rent",
            if sharing.is_empty() {
                "none offered".to_string()
            } else {
                sharing.join(", ")
            },
        ),
        (
            "Amenities",
            format!(
                "{} amenities, {} nearby places",
                amenities.len(),
                draft.nearby_places.len()
            ),
        ),
        (
            "Pricing & media",
            format!(
                "deposit \u{20b9}{}, {} photos",
                draft.security_deposit,
                draft.images.len()
            ),
        ),
    ];

    let mut lines = vec![Line::from("")];
    for (i, (label, summary)) in sections.iter().enumerate() {
        let style = if i == selected {
            Style::default().fg(Color::Black).bg(color).bold()
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("  {:<18} {}", label, summary),
            style,
        )));
    }

    lines.push(Line::from(""));
    let publish_label = match wizard.mode {
        WizardMode::Create => "  \u{2192} Publish listing",
        WizardMode::Edit { .. } => "  \u{2192} Save changes",
    };
    let publish_style = if selected == PREVIEW_ENTRY_COUNT - 1 {
        Style::default().fg(Color::Black).bg(color).bold()
    } else {
        Style::default().fg(color)
    };
    lines.push(Line::from(Span::styled(publish_label, publish_style)));

    if let Some(message) = &wizard.remote_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            "  Fix the fields above and publish again.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SharingEntry;

    fn complete_draft() -> ListingDraft {
        let mut draft = ListingDraft::new();
        draft.apply(DraftPatch {
            pg_name: Some("Green View PG".to_string()),
            address: Some("12 MG Road".to_string()),
            city: Some("Pune".to_string()),
            area: Some("Kothrud".to_string()),
            category: Some(Category::Gents),
            preferred_for: Some(PreferredFor::Students),
            phone_number: Some("9876543210".to_string()),
            security_deposit: Some("5000".to_string()),
            notice_period: Some("30".to_string()),
            images: Some(vec![ImageEntry::Pending(PathBuf::from("front.jpg"))]),
            ..Default::default()
        });
        let mut sharing = draft.sharing.clone();
        sharing.insert(
            SharingKind::Double,
            SharingEntry {
                enabled: true,
                rent: "9000".to_string(),
            },
        );
        draft.apply(DraftPatch {
            sharing: Some(sharing),
            ..Default::default()
        });
        draft
    }

    #[test]
    fn next_is_blocked_until_step_validates() {
        let mut wizard = WizardState::new(WizardMode::Create);
        wizard.next();
        assert_eq!(wizard.current_step(), Step::BasicInfo);
        assert!(!wizard.errors.is_empty());

        wizard.draft = complete_draft();
        wizard.next();
        assert_eq!(wizard.current_step(), Step::SharingRent);
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn prev_floors_at_first_step() {
        let mut wizard = WizardState::new(WizardMode::Create);
        wizard.prev();
        assert_eq!(wizard.current_step(), Step::BasicInfo);
    }

    #[test]
    fn prev_clears_errors() {
        let mut wizard = WizardState::new(WizardMode::Create);
        wizard.draft = complete_draft();
        wizard.next();
        wizard.next();
        wizard.go_to(2);
        wizard.draft.sharing.values_mut().for_each(|e| e.enabled = false);
        wizard.next();
        assert!(!wizard.errors.is_empty());
        wizard.prev();
        assert!(wizard.errors.is_empty());
        assert_eq!(wizard.current_step(), Step::BasicInfo);
    }

    #[test]
    fn go_to_skips_validation() {
        let mut wizard = WizardState::new(WizardMode::Create);
        wizard.go_to(Step::Preview.position());
        assert_eq!(wizard.current_step(), Step::Preview);
        assert!(wizard.errors.is_empty());

        wizard.go_to(99);
        assert_eq!(wizard.current_step(), Step::Preview);
    }

    #[test]
    fn hydrate_runs_at_most_once() {
        let mut wizard = WizardState::new(WizardMode::Edit { id: 7, user_id: 3 });
        let mut calls = 0;

        let record: ListingRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "pg_name": "Sunrise Stay",
                "city": "Pune",
                "area": "Baner",
                "phone_number": "9876543210",
                "whatsapp_number": "9876543210",
                "sharing_types": [{"type": "single", "enabled": true, "rent": "7500"}],
                "images": ["https://cdn.example.com/pg/7/a.jpg"]
            }"#,
        )
        .unwrap();

        let ran = wizard
            .hydrate(|| {
                calls += 1;
                Ok(record.clone())
            })
            .unwrap();
        assert!(ran);
        assert_eq!(wizard.draft.pg_name, "Sunrise Stay");
        assert!(wizard.draft.same_as_phone);
        assert_eq!(wizard.draft.persisted_images().count(), 1);

        // A second attempt does not refetch or overwrite edits
        wizard.draft.pg_name = "Edited locally".to_string();
        let ran = wizard
            .hydrate(|| {
                calls += 1;
                Ok(record.clone())
            })
            .unwrap();
        assert!(!ran);
        assert_eq!(calls, 1);
        assert_eq!(wizard.draft.pg_name, "Edited locally");
    }

    #[test]
    fn failed_hydration_is_terminal_for_the_instance() {
        let mut wizard = WizardState::new(WizardMode::Edit { id: 7, user_id: 3 });
        let result = wizard.hydrate(|| Err(ApiError::NotFound));
        assert!(result.is_err());

        // The guard stays set; no second fetch happens
        let mut calls = 0;
        let ran = wizard
            .hydrate(|| {
                calls += 1;
                Err(ApiError::NotFound)
            })
            .unwrap();
        assert!(!ran);
        assert_eq!(calls, 0);
    }

    #[test]
    fn edit_tag_is_skipped_on_narrow_terminals() {
        // 12 columns is narrower than the " editing #7 " tag plus borders
        let backend = ratatui::backend::TestBackend::new(12, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let wizard = WizardState::new(WizardMode::Edit { id: 7, user_id: 3 });
        terminal.draw(|f| render_wizard(f, &wizard)).unwrap();
    }

    #[test]
    fn remote_error_returns_to_preview() {
        let mut wizard = WizardState::new(WizardMode::Create);
        wizard.set_remote_error("the server rejected the listing".to_string());
        assert_eq!(wizard.current_step(), Step::Preview);
        assert!(wizard.remote_error.is_some());
    }
}
