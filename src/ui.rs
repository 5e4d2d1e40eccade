use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    celebration::Celebration,
    difficulty::Difficulty,
    game::{GameSession, Status},
    theme::Palette,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
/// At or below this many seconds the timer turns red
pub const DANGER_SECS: u32 = 10;

const HELP: &str = "(enter) guess  (r)eset  (e)asy (m)edium (h)ard  (tab) next level  (t)heme  (esc)ape";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session();
        let palette = self.theme().palette();

        let base = Style::default().fg(palette.fg).bg(palette.bg);
        let bold = base.add_modifier(Modifier::BOLD);
        let dim = base.fg(palette.dim);

        let frame = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(" Guess The Number ", bold))
            .title_top(Line::from(format!(" {} (t) ", self.theme().toggle_icon())).right_aligned())
            .style(base);
        let inner = frame.inner(area);
        frame.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // levels
                Constraint::Length(1), // range
                Constraint::Length(1), // timer
                Constraint::Length(3), // input box
                Constraint::Length(1), // message
                Constraint::Length(1), // hint
                Constraint::Length(1), // attempts
                Constraint::Min(2),    // history
                Constraint::Length(1), // help
            ])
            .split(inner);

        Paragraph::new(level_selector(session.difficulty(), &palette, base))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            format!("Between 1 and {}", session.max_range()),
            dim,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let timer_style = if session.time_remaining() <= DANGER_SECS {
            bold.fg(palette.danger)
        } else {
            bold
        };
        Paragraph::new(Span::styled(
            format!("Time Left: {}s", session.time_remaining()),
            timer_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        render_input(self.input(), session.is_over(), &palette, base, chunks[3], buf);

        if let Some(message) = session.message() {
            let color = if session.status() == Status::Won {
                palette.win
            } else {
                palette.lose
            };
            Paragraph::new(Span::styled(message.to_string(), bold.fg(color)))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        if let (Some(hint), false) = (session.hint(), session.is_over()) {
            Paragraph::new(Span::styled(hint.to_string(), base.add_modifier(Modifier::ITALIC)))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }

        Paragraph::new(Span::styled(
            format!(
                "Attempts: {} / {}",
                session.attempts_used(),
                session.max_attempts()
            ),
            base,
        ))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        render_history(session, &palette, base, chunks[7], buf);

        Paragraph::new(Span::styled(HELP, dim.add_modifier(Modifier::ITALIC)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[8], buf);

        if self.celebration.is_active {
            render_celebration(&self.celebration, area, buf);
        }
    }
}

fn level_selector(current: Difficulty, palette: &Palette, base: Style) -> Line<'static> {
    let spans = Difficulty::ALL
        .iter()
        .map(|level| {
            if *level == current {
                Span::styled(
                    format!("[{level}]"),
                    base.fg(palette.accent).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {level} "), base.fg(palette.dim))
            }
        })
        .interleave_shortest(std::iter::repeat(Span::styled("  ", base)).take(2))
        .collect::<Vec<_>>();

    Line::from(spans)
}

fn render_input(
    input: &str,
    disabled: bool,
    palette: &Palette,
    base: Style,
    area: Rect,
    buf: &mut Buffer,
) {
    let border = if disabled { palette.dim } else { palette.accent };
    let content = if disabled {
        Span::styled(input.to_string(), base.fg(palette.dim))
    } else {
        Span::styled(
            format!("{input}_"),
            base.add_modifier(Modifier::BOLD),
        )
    };

    Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(base.fg(border))
                .title("Your guess"),
        )
        .render(area, buf);
}

fn render_history(
    session: &GameSession,
    palette: &Palette,
    base: Style,
    area: Rect,
    buf: &mut Buffer,
) {
    if session.history().is_empty() {
        return;
    }

    let lines = vec![
        Line::from(Span::styled(
            "Previous Guesses",
            base.fg(palette.dim).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            session.history().iter().join("  "),
            base.add_modifier(Modifier::BOLD),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = colors[particle.color_index % colors.len()];
        let life = particle.life();
        let style = if particle.is_letter || life > 0.7 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else if life > 0.3 {
            Style::default().fg(color)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(particle.symbol);
            cell.set_style(style);
        }
    }
}
