use crate::games::carioca::{self, ROUNDS};

use ratatui::layout::{Constraint, Direction, Flex, Layout};
use ratatui::style::{self, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{BorderType, Clear, HighlightSpacing, List, ListState, Row, StatefulWidget, Table};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Stylize,
    symbols::border,
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget},
};

// Which input the next key press goes to. Browse is the resting mode; the
// others each own a popup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Browse,
    NameEntry,
    ScoreEntry,
    ConfirmReset,
    Rules,
}

#[derive(Clone)]
pub struct InteractiveApp {
    pub state: carioca::State,
    pub mode: Mode,
    pub input: String,
    pub players_state: ListState,
    pub show_table: bool,
}

impl InteractiveApp {
    pub fn selected_player(&self) -> Option<&carioca::Player> {
        self.players_state
            .selected()
            .and_then(|idx| self.state.players.get(idx))
    }
}

// One row of the current-round entry list
fn player_line(player: &carioca::Player, round_idx: usize) -> Line {
    Line::from(vec![
        Span::styled(format!(" {:<16}", player.name), Style::default()),
        Span::styled(format!("{:>5}", player.scores[round_idx]), Style::default().bold()),
        format!("   (total {})", player.total).into(),
    ])
}

fn centered_popup(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(pct_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(pct_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

fn render_score_table(app: &InteractiveApp, area: Rect, buf: &mut Buffer) {
    let leaders = carioca::leaders(&app.state);

    let header = Row::new(
        std::iter::once("Player".to_string())
            .chain(ROUNDS.iter().map(|r| format!("R{}", r.id)))
            .chain(std::iter::once("Total".to_string())),
    )
    .bold();

    let rows = app.state.players.iter().map(|player| {
        let name = if leaders.contains(&player.id) {
            format!("{} 🏆", player.name)
        } else {
            player.name.clone()
        };

        Row::new(
            std::iter::once(name)
                .chain(player.scores.iter().map(|s| s.to_string()))
                .chain(std::iter::once(player.total.to_string())),
        )
    });

    let mut widths = vec![Constraint::Min(18)];
    widths.extend(vec![Constraint::Length(5); ROUNDS.len()]);
    widths.push(Constraint::Length(7));

    let table = Table::new(rows, widths).header(header).column_spacing(1);

    Widget::render(table, area, buf);
}

impl Widget for InteractiveApp {
    fn render(mut self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(12),
            ])
            .split(area);

        let round = self.state.current_round();

        let header_text = Text::from(vec![
            Line::from(vec![
                " ".into(),
                if self.state.is_final_round() {
                    Span::styled(" FINAL ROUND ", Style::default().fg(style::Color::Red)).bold().add_modifier(Modifier::REVERSED)
                } else {
                    Span::styled(format!(" ROUND {}/{} ", round.id, ROUNDS.len()), Style::default().fg(style::Color::Blue)).bold().add_modifier(Modifier::REVERSED)
                },
                format!(" {}: ", round.name).bold(),
                round.description.into(),
                format!("   Players: {}", self.state.players.len()).into(),
            ]),
            Line::from(vec![
                " Previous Round ".into(),
                "<←> ".blue().bold(),
                " Next Round ".into(),
                "<→> ".blue().bold(),
            ]),
        ]);

        Paragraph::new(header_text)
            .block(Block::bordered().border_set(border::THICK).title(" Carioca Chilena "))
            .render(layout[0], buf);

        // Current round score entry
        let items = List::new(self.state.players.iter().map(|p| player_line(p, self.state.round)))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol(" →")
            .highlight_spacing(HighlightSpacing::Always)
            .repeat_highlight_symbol(true);

        let entry_block = Block::bordered()
            .title(Line::from(format!(" {} Scores ", round.name).bold()));

        let entry_inner = entry_block.inner(layout[1]);
        entry_block.render(layout[1], buf);

        if self.state.players.is_empty() {
            Paragraph::new(" No players yet, press <a> to add one".italic())
                .render(entry_inner, buf);
        } else {
            StatefulWidget::render(items, entry_inner, buf, &mut self.players_state);
        }

        let table_block = Block::bordered()
            .title(Line::from(" Score Table ".bold()).centered())
            .title_bottom(Line::from(vec![
                " Add ".into(),
                "<a> ".blue().bold(),
                " Remove ".into(),
                "<d> ".blue().bold(),
                " Edit Score ".into(),
                "<RET> ".blue().bold(),
                " Table ".into(),
                "<t> ".blue().bold(),
                " Rules ".into(),
                "<i> ".blue().bold(),
                " Reset ".into(),
                "<r> ".blue().bold(),
                " Quit ".into(),
                "<q> ".blue().bold(),
            ]).right_aligned());

        let table_inner = table_block.inner(layout[2]);
        table_block.render(layout[2], buf);

        if self.show_table {
            render_score_table(&self, table_inner, buf);
        } else {
            Paragraph::new(" Hidden, press <t> to show".italic()).render(table_inner, buf);
        }

        match self.mode {
            Mode::NameEntry => {
                let area = centered_popup(area, 50, 20);
                Clear.render(area, buf);

                Paragraph::new(Text::from(vec![
                    Line::from(""),
                    Line::from(format!("  Name: {}_", self.input)),
                ]))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Thick)
                        .title(" New Player ")
                        .title_bottom(Line::from(vec![" Add ".into(), "<RET> ".blue().bold(), " Cancel ".into(), "<ESC> ".blue().bold()]).right_aligned()),
                )
                .render(area, buf);
            },
            Mode::ScoreEntry => {
                let area = centered_popup(area, 50, 20);
                Clear.render(area, buf);

                let title = match self.selected_player() {
                    Some(player) => format!(" {} — {} ", player.name, round.name),
                    None => " Score ".to_string(),
                };

                Paragraph::new(Text::from(vec![
                    Line::from(""),
                    Line::from(format!("  Score: {}_", self.input)),
                ]))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Thick)
                        .title(title)
                        .title_bottom(Line::from(vec![" Save ".into(), "<RET> ".blue().bold(), " Cancel ".into(), "<ESC> ".blue().bold()]).right_aligned()),
                )
                .render(area, buf);
            },
            Mode::ConfirmReset => {
                let area = centered_popup(area, 50, 25);
                Clear.render(area, buf);

                Paragraph::new(Text::from(vec![
                    Line::from(""),
                    Line::from("  This restarts the game and removes all"),
                    Line::from("  players and scores."),
                ]))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Thick)
                        .title(" Reset Game? ")
                        .title_bottom(Line::from(vec![" Confirm ".into(), "<y> ".blue().bold(), " Cancel ".into(), "<n> ".blue().bold()]).right_aligned()),
                )
                .render(area, buf);
            },
            Mode::Rules => {
                let area = centered_popup(area, 60, 60);
                Clear.render(area, buf);

                Paragraph::new(Text::from(vec![
                    Line::from(""),
                    Line::from("  Carioca is a rummy-like card game played with a"),
                    Line::from("  French deck across seven contract rounds."),
                    Line::from(""),
                    Line::from(vec!["  Sets".bold(), ": three or more cards of the same rank".into()]),
                    Line::from(vec!["  Runs".bold(), ": three or more consecutive cards of one suit".into()]),
                    Line::from(""),
                    Line::from("  Each round names the melds required to lay down."),
                    Line::from(vec!["  The player with the ".into(), "lowest".bold(), " accumulated total wins.".into()]),
                ]))
                .block(
                    Block::bordered()
                        .border_type(BorderType::Thick)
                        .title(" Rules ")
                        .title_bottom(Line::from(vec![" Close ".into(), "<q> ".blue().bold()]).right_aligned()),
                )
                .render(area, buf);
            },
            Mode::Browse => {}
        }
    }
}
