use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, stderr, Stderr, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkGrey, Red, Reset};
use crossterm::style::{Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use log::debug;
use treecuts_core::error::FilterError;
use treecuts_core::navigator::{Filter, FilterOutcome, FilterRequest};

use super::colors::Palette;
use super::matching::{find_matches, Match};
use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, UiState, ViewportState};

const APP_NAME: &str = "treecuts";
const PROMPT: &str = "> ";
const PLACEHOLDER: &str = "...";
const INDICATOR: &str = "▌";
const MARK: char = '*';

/// Row of the first candidate; the header and the prompt sit above it.
const LIST_TOP: u16 = 2;
/// Rows not available to the list: header, prompt and footer
const CHROME_ROWS: u16 = 3;

type FilterResult<T> = std::result::Result<T, FilterError>;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stderr = stderr();
        let _ = stderr.execute(DisableMouseCapture);
        let _ = stderr.execute(LeaveAlternateScreen);
    }
}

/// Filter widget drawn with crossterm on stderr, leaving stdout to the
/// chosen command.
pub struct TerminalFilter {
    palette: Palette,
    list_height: u16,
}

impl TerminalFilter {
    #[must_use]
    pub fn new(palette: Palette, list_height: u16) -> Self {
        Self {
            palette,
            list_height,
        }
    }

    fn viewport_height(&self, terminal_height: u16) -> u16 {
        self.list_height
            .min(terminal_height.saturating_sub(CHROME_ROWS))
            .max(1)
    }

    fn redraw(
        &self,
        out: &mut Stderr,
        request: &FilterRequest<'_>,
        ui_state: &UiState,
        matches: &[Match],
    ) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        self.print_header(out, request, ui_state, matches.len())?;
        self.print_prompt(out, ui_state)?;

        if matches.is_empty() {
            let message = if request.strict {
                "No matches!"
            } else {
                "No matches, <enter> uses the typed text"
            };
            queue!(
                out,
                MoveTo(0, LIST_TOP),
                SetForegroundColor(Red),
                Print(message),
                SetForegroundColor(Reset)
            )?;
        } else {
            self.print_matches(out, request, ui_state, matches)?;
        }

        print_footer(out, request, ui_state, matches)?;

        out.flush()
    }

    fn print_header(
        &self,
        out: &mut Stderr,
        request: &FilterRequest<'_>,
        ui_state: &UiState,
        match_count: usize,
    ) -> io::Result<()> {
        let position = if match_count == 0 {
            0
        } else {
            ui_state.selected_index + 1
        };

        let mut text = format!(
            "{APP_NAME} {}  {}/{}  <enter>: pick  <left>: back  <esc>: quit",
            request.header,
            pad_to_width_of(position, match_count),
            match_count
        );
        if request.limit > 1 {
            text.push_str(&format!("  <tab>: mark ({}/{})", ui_state.marked.len(), request.limit));
        }

        queue!(
            out,
            MoveTo(0, 0),
            SetForegroundColor(self.palette.header),
            SetAttribute(Attribute::Bold),
            Print(fit(&text, ui_state.viewport.width)),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Reset),
        )
    }

    fn print_prompt(&self, out: &mut Stderr, ui_state: &UiState) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, 1),
            SetForegroundColor(self.palette.prompt),
            Print(PROMPT),
            SetForegroundColor(Reset),
        )?;

        if ui_state.query.is_empty() {
            queue!(
                out,
                SetForegroundColor(DarkGrey),
                Print(PLACEHOLDER),
                SetForegroundColor(Reset)
            )
        } else {
            queue!(out, Print(&ui_state.query))
        }
    }

    fn print_matches(
        &self,
        out: &mut Stderr,
        request: &FilterRequest<'_>,
        ui_state: &UiState,
        matches: &[Match],
    ) -> io::Result<()> {
        let viewport = &ui_state.viewport;

        let visible = matches
            .iter()
            .enumerate()
            .skip(viewport.offset)
            .take(viewport.height as usize);

        for (row, (i, m)) in (LIST_TOP..).zip(visible) {
            let is_selected = i == ui_state.selected_index;
            let is_marked = ui_state.marked.contains(&m.index);
            let candidate = request.candidates.get(m.index).map_or("", String::as_str);

            self.print_row(out, row, candidate, m, is_selected, is_marked, viewport.width)?;
        }

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn print_row(
        &self,
        out: &mut Stderr,
        row: u16,
        candidate: &str,
        m: &Match,
        is_selected: bool,
        is_marked: bool,
        width: u16,
    ) -> io::Result<()> {
        queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

        if is_selected {
            queue!(
                out,
                SetForegroundColor(self.palette.indicator),
                Print(INDICATOR),
                SetForegroundColor(Reset),
                SetAttribute(Attribute::Bold),
            )?;
        } else {
            queue!(out, Print(" "))?;
        }

        let mark = if is_marked { MARK } else { ' ' };
        queue!(out, Print(mark), Print(' '))?;

        let positions: HashSet<usize> = m.positions.iter().copied().collect();
        let room = (width as usize).saturating_sub(3);

        for (i, c) in candidate.chars().take(room).enumerate() {
            if positions.contains(&i) {
                queue!(
                    out,
                    SetForegroundColor(self.palette.matched),
                    Print(c),
                    SetForegroundColor(Reset)
                )?;
            } else {
                queue!(out, Print(c))?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset))
    }
}

impl Filter for TerminalFilter {
    fn run(&mut self, request: &FilterRequest<'_>) -> FilterResult<FilterOutcome> {
        if request.candidates.is_empty() {
            return Err(FilterError::NoCandidates);
        }

        let mut stderr = stderr();
        stderr.execute(EnterAlternateScreen)?;
        enable_raw_mode()?;

        let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode and mouse capture is disabled
        stderr.execute(EnableMouseCapture)?;

        let (width, height) = terminal::size()?;
        let viewport = ViewportState {
            offset: 0,
            height: self.viewport_height(height),
            width,
        };

        let mut ui_state = UiState::new(request.query, viewport);
        let mut matches = find_matches(&ui_state.query, request.candidates, request.match_mode);

        let mut down_row: Option<u16> = None;
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                self.redraw(&mut stderr, request, &ui_state, &matches)?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(500))? {
                continue;
            }

            let mut new_ui_state: Option<UiState> = None;
            let mut index_change_direction: Option<CycleDirection> = None;

            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    let (outcome, new_state, new_direction) =
                        handle_key_event(key_event, &ui_state, &matches, request);

                    if let Some(outcome) = outcome {
                        debug!("Filter outcome: {outcome:?}");
                        return Ok(outcome);
                    }

                    new_ui_state = new_state;
                    index_change_direction = new_direction;
                }
                Event::Mouse(MouseEvent {
                    kind,
                    row,
                    modifiers,
                    ..
                }) if modifiers == KeyModifiers::NONE => match kind {
                    MouseEventKind::Down(MouseButton::Left) => down_row = Some(row),
                    MouseEventKind::Up(MouseButton::Left) => {
                        let clicked = down_row
                            .take()
                            .and_then(|down_row| clicked_match(down_row, &ui_state, matches.len()));

                        if let Some(index) = clicked {
                            return Ok(picked(request, &matches, index));
                        }
                    }
                    MouseEventKind::ScrollDown => index_change_direction = Some(Down),
                    MouseEventKind::ScrollUp => index_change_direction = Some(Up),
                    _ => {}
                },
                Event::Resize(width, height) => {
                    new_ui_state = Some(handle_resize(
                        width,
                        self.viewport_height(height),
                        &ui_state,
                        matches.len(),
                    ));
                    needs_redraw = true;
                }
                _ => {}
            }

            if let Some(state) = new_ui_state {
                if state.query != ui_state.query {
                    matches = find_matches(&state.query, request.candidates, request.match_mode);
                }
                needs_redraw |= state != ui_state;
                ui_state = state;
            }

            if let Some(direction) = index_change_direction {
                let state = move_selected_index(&ui_state, matches.len(), direction);
                needs_redraw |= state != ui_state;
                ui_state = state;
            }
        }
    }
}

fn print_footer(
    out: &mut Stderr,
    request: &FilterRequest<'_>,
    ui_state: &UiState,
    matches: &[Match],
) -> io::Result<()> {
    let hint = matches
        .get(ui_state.selected_index)
        .and_then(|m| request.hints.get(m.index))
        .map_or("", String::as_str);

    queue!(
        out,
        MoveTo(0, LIST_TOP + ui_state.viewport.height),
        SetForegroundColor(DarkGrey),
        Print(fit(hint, ui_state.viewport.width)),
        SetForegroundColor(Reset),
    )
}

/// Cuts `text` to the terminal width.
fn fit(text: &str, width: u16) -> String {
    text.chars().take(width as usize).collect()
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

/// Handle keyboard events in the filter widget.
///
/// Returns the outcome that ends the filter, the new state, or the direction
/// to move the highlight in.
pub(crate) fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    matches: &[Match],
    request: &FilterRequest<'_>,
) -> (
    Option<FilterOutcome>,
    Option<UiState>,
    Option<CycleDirection>,
) {
    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Up => (None, None, Some(Up)),
        KeyCode::Down => (None, None, Some(Down)),
        KeyCode::Char('p' | 'k') if control => (None, None, Some(Up)),
        KeyCode::Char('n' | 'j') if control => (None, None, Some(Down)),
        KeyCode::Char('c') if control => (Some(FilterOutcome::Aborted), None, None),
        KeyCode::Esc => (Some(FilterOutcome::Aborted), None, None),
        KeyCode::Enter | KeyCode::Right => (confirm(ui_state, matches, request), None, None),
        KeyCode::Left if ui_state.query.is_empty() => (Some(FilterOutcome::Back), None, None),
        KeyCode::Tab if request.limit > 1 => match matches.get(ui_state.selected_index) {
            Some(m) => {
                let mut updated_state = ui_state.clone();
                updated_state.toggle_mark(m.index, request.limit);
                (None, Some(updated_state), Some(Down))
            }
            None => (None, None, None),
        },
        KeyCode::Backspace if !ui_state.query.is_empty() => {
            let mut query = ui_state.query.clone();
            query.pop();
            (None, Some(ui_state.with_query(query)), None)
        }
        KeyCode::Char(c) if !control => {
            let mut query = ui_state.query.clone();
            query.push(c);
            (None, Some(ui_state.with_query(query)), None)
        }
        _ => (None, None, None),
    }
}

/// Outcome of confirming: the marked candidates, the highlighted match, or
/// the typed text when nothing matches and the filter is not strict.
fn confirm(
    ui_state: &UiState,
    matches: &[Match],
    request: &FilterRequest<'_>,
) -> Option<FilterOutcome> {
    if !ui_state.marked.is_empty() {
        return Some(FilterOutcome::Selected(
            ui_state
                .marked
                .iter()
                .filter_map(|&index| request.candidates.get(index).cloned())
                .collect(),
        ));
    }

    if ui_state.selected_index < matches.len() {
        return Some(picked(request, matches, ui_state.selected_index));
    }

    if matches.is_empty() && !request.strict && !ui_state.query.is_empty() {
        return Some(FilterOutcome::Typed(ui_state.query.clone()));
    }

    None
}

fn picked(request: &FilterRequest<'_>, matches: &[Match], index: usize) -> FilterOutcome {
    FilterOutcome::Picked {
        index,
        matches: matches
            .iter()
            .filter_map(|m| request.candidates.get(m.index).cloned())
            .collect(),
    }
}

/// Index into the matches of the row clicked at `row`, if it shows one.
fn clicked_match(row: u16, ui_state: &UiState, match_count: usize) -> Option<usize> {
    let list_row = row.checked_sub(LIST_TOP)?;
    if list_row >= ui_state.viewport.height {
        return None;
    }

    let index = list_row as usize + ui_state.viewport.offset;
    (index < match_count).then_some(index)
}

/// Handle window resize events
fn handle_resize(width: u16, new_height: u16, ui_state: &UiState, match_count: usize) -> UiState {
    let mut ui_state = ui_state.clone();
    let selected_index = ui_state.selected_index;
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less if selected_index >= new_viewport.offset + new_height as usize => {
            new_viewport.offset = selected_index.saturating_sub(new_height as usize - 1);

            if new_viewport.offset + new_height as usize > match_count {
                new_viewport.offset = match_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Move the selected index in the given direction, wrapping around
fn move_selected_index(ui_state: &UiState, match_count: usize, direction: CycleDirection) -> UiState {
    if match_count == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let height = ui_state.viewport.height.max(1) as usize;

    match direction {
        Up => {
            if new_index == 0 {
                new_index = match_count - 1;
                ui_state.viewport.offset = new_index.saturating_sub(height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % match_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index - height + 1;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}
