use crate::model::{format_date, parse_date, Planner, PRIORITY_COUNT};
use crate::slots::{Slot, SLOT_COUNT};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;

pub fn run(planner: Planner, start_date: NaiveDate) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(planner, start_date);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    planner: Planner,
    date: NaiveDate,
    focus: Focus,
    priority_idx: usize,
    dump_idx: usize,
    slot_idx: usize,
    dump_offset: usize,
    slot_offset: usize,
    status: String,
    mode: Mode,
}

enum Mode {
    Normal,
    Editing { target: EditTarget, field: FieldValue },
    GoToDate(FieldValue),
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Priorities,
    BrainDump,
    Schedule,
}

impl Focus {
    fn label(self) -> &'static str {
        match self {
            Focus::Priorities => "priorities",
            Focus::BrainDump => "brain dump",
            Focus::Schedule => "schedule",
        }
    }

    fn next(self) -> Focus {
        match self {
            Focus::Priorities => Focus::BrainDump,
            Focus::BrainDump => Focus::Schedule,
            Focus::Schedule => Focus::Priorities,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Priorities => Focus::Schedule,
            Focus::BrainDump => Focus::Priorities,
            Focus::Schedule => Focus::BrainDump,
        }
    }
}

#[derive(Copy, Clone)]
enum EditTarget {
    Priority(usize),
    Dump(usize),
    Slot(Slot),
}

impl EditTarget {
    fn title(self) -> String {
        match self {
            EditTarget::Priority(idx) => format!("Priority {}", idx + 1),
            EditTarget::Dump(_) => "Brain Dump Item".to_string(),
            EditTarget::Slot(slot) => format!("Schedule {}", slot.label()),
        }
    }
}

#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_char(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_char(self.cursor, &self.value);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

impl App {
    fn new(planner: Planner, date: NaiveDate) -> Self {
        App {
            planner,
            date,
            focus: Focus::Priorities,
            priority_idx: 0,
            dump_idx: 0,
            slot_idx: 0,
            dump_offset: 0,
            slot_offset: 0,
            status: format!("Planning {}", format_date(date)),
            mode: Mode::Normal,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Editing { .. } => {
                self.handle_edit_key(key);
                false
            }
            Mode::GoToDate(_) => {
                self.handle_goto_key(key);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Left | KeyCode::Char('h') => self.focus = self.focus.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.focus = self.focus.next(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Enter | KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('a') => self.add_dump_item(),
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_dump_item(),
            KeyCode::Char('m') => self.carry_over(),
            KeyCode::Char('[') | KeyCode::Char('p') => self.step_day(-1),
            KeyCode::Char(']') | KeyCode::Char('n') => self.step_day(1),
            KeyCode::Char('t') => self.go_to_today(),
            KeyCode::Char('g') => {
                self.mode = Mode::GoToDate(FieldValue::new(&format_date(self.date)));
                self.status = "Go to date (Enter to jump, Esc to cancel)".into();
            }
            _ => {}
        }
        false
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let mut mode = std::mem::replace(&mut self.mode, Mode::Normal);
        let mut close = false;
        if let Mode::Editing { target, field } = &mut mode {
            match key.code {
                KeyCode::Esc => {
                    close = true;
                    self.status = "Canceled".into();
                }
                KeyCode::Enter => {
                    self.commit_edit(*target, field.value.clone());
                    close = true;
                }
                KeyCode::Left => field.move_left(),
                KeyCode::Right => field.move_right(),
                KeyCode::Backspace => field.backspace(),
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        field.insert_char(c);
                    }
                }
                _ => {}
            }
        }
        self.mode = if close { Mode::Normal } else { mode };
    }

    fn handle_goto_key(&mut self, key: KeyEvent) {
        let mut mode = std::mem::replace(&mut self.mode, Mode::Normal);
        let mut close = false;
        if let Mode::GoToDate(field) = &mut mode {
            match key.code {
                KeyCode::Esc => {
                    close = true;
                    self.status = "Canceled".into();
                }
                KeyCode::Enter => {
                    close = true;
                    match parse_date(&field.value) {
                        Some(date) => self.set_date(date),
                        // Unparseable input leaves the current date alone.
                        None => {
                            self.status =
                                format!("Not a date: {} (expected YYYY-MM-DD)", field.value.trim())
                        }
                    }
                }
                KeyCode::Left => field.move_left(),
                KeyCode::Right => field.move_right(),
                KeyCode::Backspace => field.backspace(),
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        field.insert_char(c);
                    }
                }
                _ => {}
            }
        }
        self.mode = if close { Mode::Normal } else { mode };
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Priorities => {
                self.priority_idx = step_index(self.priority_idx, delta, PRIORITY_COUNT);
            }
            Focus::BrainDump => {
                let len = self.planner.day(self.date).brain_dump.len();
                self.dump_idx = step_index(self.dump_idx, delta, len);
            }
            Focus::Schedule => {
                self.slot_idx = step_index(self.slot_idx, delta, SLOT_COUNT);
            }
        }
    }

    fn begin_edit(&mut self) {
        let record = self.planner.day(self.date);
        let target = match self.focus {
            Focus::Priorities => EditTarget::Priority(self.priority_idx),
            Focus::BrainDump => {
                if record.brain_dump.is_empty() {
                    self.status = "Brain dump is empty (a adds an item)".into();
                    return;
                }
                let idx = self.dump_idx.min(record.brain_dump.len() - 1);
                self.dump_idx = idx;
                EditTarget::Dump(idx)
            }
            Focus::Schedule => match Slot::new(self.slot_idx) {
                Some(slot) => EditTarget::Slot(slot),
                None => return,
            },
        };
        let seed = match target {
            EditTarget::Priority(idx) => record.priorities[idx].clone(),
            EditTarget::Dump(idx) => record.brain_dump[idx].text.clone(),
            EditTarget::Slot(slot) => record.slot_text(slot).to_string(),
        };
        self.status = format!(
            "Editing {} (Enter saves, Esc cancels)",
            target.title().to_lowercase()
        );
        self.mode = Mode::Editing {
            target,
            field: FieldValue::new(&seed),
        };
    }

    fn commit_edit(&mut self, target: EditTarget, value: String) {
        let record = self.planner.day(self.date);
        match target {
            EditTarget::Priority(idx) => {
                if record.set_priority(idx, value) {
                    self.status = format!("Updated priority {}", idx + 1);
                }
            }
            EditTarget::Dump(idx) => {
                if record.set_dump_text(idx, value) {
                    self.status = "Updated brain dump item".into();
                }
            }
            EditTarget::Slot(slot) => {
                record.set_slot(slot, value);
                self.status = format!("Updated {}", slot.label());
            }
        }
    }

    fn add_dump_item(&mut self) {
        let record = self.planner.day(self.date);
        record.add_dump_item();
        self.focus = Focus::BrainDump;
        self.dump_idx = record.brain_dump.len() - 1;
        self.mode = Mode::Editing {
            target: EditTarget::Dump(self.dump_idx),
            field: FieldValue::new(""),
        };
        self.status = "New brain dump item".into();
    }

    fn toggle_dump_item(&mut self) {
        if self.focus != Focus::BrainDump {
            return;
        }
        let record = self.planner.day(self.date);
        if record.toggle_dump(self.dump_idx) {
            let done = record
                .brain_dump
                .get(self.dump_idx)
                .map(|item| item.completed)
                .unwrap_or(false);
            self.status = if done {
                "Marked done".into()
            } else {
                "Marked not done".into()
            };
        }
    }

    fn carry_over(&mut self) {
        let moved = self.planner.carry_over(self.date);
        if moved == 0 {
            self.status = "Nothing unfinished to carry over".into();
            return;
        }
        let next = self.date.succ_opt().unwrap_or(self.date);
        self.status = format!(
            "Moved {} unfinished item{} to {}",
            moved,
            if moved == 1 { "" } else { "s" },
            format_date(next)
        );
        self.dump_idx = 0;
    }

    fn step_day(&mut self, delta: i64) {
        let stepped = if delta < 0 {
            self.date.pred_opt()
        } else {
            self.date.succ_opt()
        };
        if let Some(date) = stepped {
            self.set_date(date);
        }
    }

    fn go_to_today(&mut self) {
        self.set_date(chrono::Local::now().date_naive());
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.dump_idx = 0;
        self.dump_offset = 0;
        self.status = format!("Planning {}", format_date(date));
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(4)])
            .split(columns[0]);

        self.draw_priorities(f, left[0]);
        self.draw_brain_dump(f, left[1]);
        self.draw_schedule(f, columns[1]);
        self.draw_footer(f, layout[2]);

        match &self.mode {
            Mode::Editing { target, field } => {
                draw_input_popup(f, &target.title(), field, "Enter save • Esc cancel");
            }
            Mode::GoToDate(field) => {
                draw_input_popup(f, "Go To Date", field, "YYYY-MM-DD • Enter jump • Esc cancel");
            }
            Mode::Normal => {}
        }
    }

    fn draw_header(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let record = self.planner.day(self.date);
        let done = record.completed_dump_count();
        let total = record.brain_dump.len();
        let title = Line::from(vec![
            Span::styled(
                "daybox ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.date.format("%A").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(format_date(self.date), Style::default().fg(Color::Yellow)),
            Span::raw("  •  "),
            Span::styled(
                format!("{}/{} dumped tasks done", done, total),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("focus {}", self.focus.label()),
                Style::default().fg(Color::Magenta),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_priorities(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Priorities;
        let record = self.planner.day(self.date);
        let selected = self.priority_idx;

        let lines: Vec<Line<'static>> = record
            .priorities
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let marker = format!("{}. ", idx + 1);
                let body = if text.is_empty() {
                    Span::styled(
                        "(unset)".to_string(),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                    )
                } else {
                    Span::styled(text.clone(), Style::default().fg(Color::White))
                };
                let mut line = Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                    body,
                ]);
                if focused && idx == selected {
                    line = line.style(
                        Style::default()
                            .bg(Color::LightCyan)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                line
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(panel_block("Top Priorities", focused));
        f.render_widget(paragraph, area);
    }

    fn draw_brain_dump(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::BrainDump;
        let record = self.planner.day(self.date);
        let len = record.brain_dump.len();
        self.dump_idx = self.dump_idx.min(len.saturating_sub(1));

        let items: Vec<ListItem<'static>> = if len == 0 {
            vec![ListItem::new("Nothing dumped yet (a adds an item)")
                .style(Style::default().fg(Color::DarkGray))]
        } else {
            record
                .brain_dump
                .iter()
                .map(|item| {
                    let checkbox = if item.completed { "[x] " } else { "[ ] " };
                    let style = if item.completed {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(checkbox.to_string(), Style::default().fg(Color::Green)),
                        Span::styled(item.text.clone(), style),
                    ]))
                })
                .collect()
        };

        let mut state = ListState::default();
        let viewport = area.height.saturating_sub(2) as usize;
        self.dump_offset = adjust_offset(self.dump_idx, self.dump_offset, viewport, 1, len);
        *state.offset_mut() = self.dump_offset;
        if focused && len > 0 {
            state.select(Some(self.dump_idx));
        }

        let title = format!("Brain Dump ({})", len);
        let list = List::new(items)
            .block(panel_block(&title, focused))
            .highlight_style(
                Style::default()
                    .bg(Color::LightCyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_schedule(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Schedule;
        let record = self.planner.day(self.date);

        let items: Vec<ListItem<'static>> = Slot::all()
            .map(|slot| {
                let text = record.slot_text(slot);
                let body = if text.is_empty() {
                    Span::styled(
                        "·".to_string(),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                    )
                } else {
                    Span::styled(text.to_string(), Style::default().fg(Color::White))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>8}  ", slot.label()),
                        Style::default().fg(Color::Yellow),
                    ),
                    body,
                ]))
            })
            .collect();

        let mut state = ListState::default();
        let viewport = area.height.saturating_sub(2) as usize;
        self.slot_offset =
            adjust_offset(self.slot_idx, self.slot_offset, viewport, 1, SLOT_COUNT);
        *state.offset_mut() = self.slot_offset;
        if focused {
            state.select(Some(self.slot_idx));
        }

        let list = List::new(items)
            .block(panel_block("Schedule", focused))
            .highlight_style(
                Style::default()
                    .bg(Color::LightCyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("Tab", Style::default().fg(Color::LightCyan)),
            Span::raw(" panel  "),
            Span::styled("↑↓", Style::default().fg(Color::LightCyan)),
            Span::raw(" select  "),
            Span::styled("Enter", Style::default().fg(Color::LightYellow)),
            Span::raw(" edit  "),
        ];
        if self.focus == Focus::BrainDump {
            spans.extend([
                Span::styled("a", Style::default().fg(Color::LightMagenta)),
                Span::raw(" add  "),
                Span::styled("Space", Style::default().fg(Color::LightGreen)),
                Span::raw(" toggle  "),
                Span::styled("m", Style::default().fg(Color::LightGreen)),
                Span::raw(" carry over  "),
            ]);
        }
        spans.extend([
            Span::styled("[ ]", Style::default().fg(Color::LightCyan)),
            Span::raw(" prev/next day  "),
            Span::styled("t", Style::default().fg(Color::LightCyan)),
            Span::raw(" today  "),
            Span::styled("g", Style::default().fg(Color::LightCyan)),
            Span::raw(" go to date  "),
            Span::styled("q", Style::default().fg(Color::LightRed)),
            Span::raw(" quit"),
        ]);
        Line::from(spans)
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(if focused { Color::Cyan } else { Color::Gray })
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
}

fn draw_input_popup(f: &mut ratatui::Frame<'_>, title: &str, field: &FieldValue, hint: &str) {
    let area = centered_rect(60, 20, f.size());
    let lines = vec![
        Line::from(Span::styled(
            field.with_caret(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = (len as isize) - 1;
    (current as isize + delta).clamp(0, max) as usize
}

fn adjust_offset(
    selected: usize,
    current_offset: usize,
    viewport: usize,
    scrolloff: usize,
    len: usize,
) -> usize {
    if viewport == 0 || len == 0 {
        return 0;
    }
    let max_offset = len.saturating_sub(viewport);
    let margin = scrolloff.min(viewport.saturating_sub(1));
    let mut offset = current_offset.min(max_offset);
    if selected < offset.saturating_add(margin) {
        offset = selected.saturating_sub(margin);
    } else {
        let upper = offset
            .saturating_add(viewport.saturating_sub(1))
            .saturating_sub(margin);
        if selected > upper {
            offset = selected.saturating_add(margin + 1).saturating_sub(viewport);
        }
    }
    offset.min(max_offset)
}

fn prev_char(cursor: usize, text: &str) -> usize {
    if cursor == 0 {
        return 0;
    }
    let mut prev = 0;
    for (idx, _) in text.char_indices() {
        if idx >= cursor {
            break;
        }
        prev = idx;
    }
    prev
}

fn next_char(cursor: usize, text: &str) -> usize {
    for (idx, ch) in text.char_indices() {
        if idx > cursor {
            return idx;
        }
        if idx == cursor {
            return cursor + ch.len_utf8();
        }
    }
    text.len()
}
