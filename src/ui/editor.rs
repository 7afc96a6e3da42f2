use crate::models::Studio;
use crate::ui::layout::{calculate_editor_chunks, centered_rect};
use crate::utils::truncate;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn row_line<'a>(label: &'a str, value: String, selected: bool) -> Line<'a> {
    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let marker = if selected { "> " } else { "  " };
    Line::from(Span::styled(format!("{marker}{label:14} {value}"), style))
}

pub fn draw_editor(f: &mut Frame, studio: &Studio) {
    let layout = calculate_editor_chunks(f.area());

    let counts = studio.difficulty_counts();
    let header_line = Line::from(vec![
        Span::styled(
            format!(
                "Question {} / {}   ",
                studio.selected_record + 1,
                studio.records.len()
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Easy: {}  ", counts.easy),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Medium: {}  ", counts.medium),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Hard: {}", counts.hard),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]);
    let header = Paragraph::new(header_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut body = Text::default();
    if let Some(record) = studio.records.get(studio.selected_record) {
        let width = layout.record_area.width.saturating_sub(20) as usize;
        body.push_line(row_line(
            "Question",
            truncate(&record.question_text, width),
            studio.selected_row == 0,
        ));
        body.push_line(row_line(
            "Code",
            truncate(&record.code_data.replace('\n', " "), width),
            studio.selected_row == 1,
        ));
        body.push_line(row_line(
            "Explanation",
            truncate(&record.answer_explanation_content, width),
            studio.selected_row == 2,
        ));
        body.push_line(row_line(
            "Difficulty",
            record.difficulty_level.tag().to_string(),
            studio.selected_row == 3,
        ));
        body.push_line(Line::from(""));
        body.push_line(Line::from(Span::styled(
            "  Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (i, option) in record.options.iter().enumerate() {
            let selected = studio.selected_row == 4 + i;
            let marker = if selected { "> " } else { "  " };
            let correctness_style = if option.correctness.is_correct() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            let text_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            body.push_line(Line::from(vec![
                Span::styled(format!("{marker}[{}] ", option.correctness.label()), correctness_style),
                Span::styled(truncate(&option.text, width), text_style),
            ]));
        }

        if studio.editing {
            body.push_line(Line::from(""));
            body.push_line(Line::from(vec![
                Span::styled(
                    "Editing: ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::from(studio.edit_buffer.as_str()),
            ]));
        }
    } else {
        body.push_line(Line::from("No questions yet - generate some from the form."));
    }

    let record_view = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Edit Question"));
    f.render_widget(record_view, layout.record_area);

    if let Some(status) = &studio.status {
        let status_line = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(status_line, layout.status_area);
    }

    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::from(" Question  "),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::from(" Field  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::from(" Edit  "),
        Span::styled("t", Style::default().fg(Color::Cyan)),
        Span::from(" Toggle  "),
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::from(" Difficulty  "),
        Span::styled("d", Style::default().fg(Color::Cyan)),
        Span::from(" Delete  "),
        Span::styled("c", Style::default().fg(Color::Cyan)),
        Span::from(" Clear  "),
        Span::styled("^D", Style::default().fg(Color::Cyan)),
        Span::from(" Export  "),
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::from(" Form"),
    ])])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_clear_confirmation(f: &mut Frame, count: usize) {
    let popup = centered_rect(44, 5, f.area());
    f.render_widget(Clear, popup);
    let dialog = Paragraph::new(vec![
        Line::from(format!("Delete all {count} questions?")),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red)),
            Span::from(" clear   "),
            Span::styled("n", Style::default().fg(Color::Green)),
            Span::from(" keep"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Clear Questions")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(dialog, popup);
}
