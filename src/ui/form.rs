use crate::models::{FormField, Studio};
use crate::ui::layout::{calculate_form_chunks, centered_rect};
use crate::utils::truncate;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

fn field_value(studio: &Studio, field: FormField) -> String {
    let form = &studio.form;
    match field {
        FormField::Technology => form
            .technology
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| "<choose technology>".to_string()),
        FormField::Topic => form.topic.clone(),
        FormField::NumberOfQuestions => form.number_of_questions.clone(),
        FormField::Difficulty => form
            .difficulty
            .map(|d| d.label().to_string())
            .unwrap_or_else(|| "<choose difficulty>".to_string()),
        FormField::TopicTag => {
            if form.topic_tag.is_empty() {
                "<choose topic tag>".to_string()
            } else {
                form.topic_tag.clone()
            }
        }
        FormField::SubTopicTag => form.sub_topic_tag.clone(),
        FormField::Syllabus => form.syllabus.replace('\n', " "),
        FormField::Prompt => {
            if studio.prompt_loading {
                "<loading...>".to_string()
            } else if form.prompt_edited {
                "(editing below)".to_string()
            } else {
                "(fetched, ^E to edit)".to_string()
            }
        }
    }
}

pub fn draw_form(f: &mut Frame, studio: &Studio) {
    let layout = calculate_form_chunks(f.area());

    let title = if studio.generation_in_flight {
        "MCQ Studio - Code Analysis Questions [generating...]"
    } else {
        "MCQ Studio - Code Analysis Questions"
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let items: Vec<ListItem> = FormField::ALL
        .iter()
        .map(|field| {
            let focused = *field == studio.form_focus;
            let style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if focused { "> " } else { "  " };
            let value = truncate(&field_value(studio, *field), 60);
            ListItem::new(format!("{marker}{:20} {value}", field.label())).style(style)
        })
        .collect();
    let fields = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Details for Prompt"),
    );
    f.render_widget(fields, layout.fields_area);

    let preview_title = if studio.form.prompt_edited && studio.form_focus == FormField::Prompt {
        "Prompt (editing template)"
    } else {
        "Assembled Prompt"
    };
    let preview_text = if studio.form.prompt_edited && studio.form_focus == FormField::Prompt {
        studio.form.raw_prompt.as_str()
    } else {
        studio.form.message.as_str()
    };
    let preview = Paragraph::new(Text::from(preview_text))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(preview_title));
    f.render_widget(preview, layout.preview_area);

    if studio.form.prompt_edited && studio.form_focus == FormField::Prompt {
        let inner_width = layout.preview_area.width.saturating_sub(2) as usize;
        let (line, col) = crate::utils::wrapped_cursor(
            &studio.form.raw_prompt,
            studio.form_cursor,
            inner_width.max(1),
        );
        f.set_cursor_position((
            layout.preview_area.x + 1 + col,
            layout.preview_area.y + 1 + line,
        ));
    }

    if let Some(status) = &studio.status {
        let status_line = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(status_line, layout.status_area);
    }

    let ready = studio.form.ready_to_generate() && !studio.generation_in_flight;
    let generate_style = if ready {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let help = Paragraph::new(vec![Line::from(vec![
        Span::styled("^G", generate_style),
        Span::from(" Generate  "),
        Span::styled("^D", Style::default().fg(Color::Cyan)),
        Span::from(" Export CSV  "),
        Span::styled("^L", Style::default().fg(Color::Cyan)),
        Span::from(" Clear  "),
        Span::styled("^E", Style::default().fg(Color::Cyan)),
        Span::from(" Edit Prompt  "),
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::from(" Editor  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::from(" Quit"),
    ])])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let popup = centered_rect(44, 5, f.area());
    f.render_widget(Clear, popup);
    let dialog = Paragraph::new(vec![
        Line::from("Quit? Unsaved questions will be lost."),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red)),
            Span::from(" quit   "),
            Span::styled("n", Style::default().fg(Color::Green)),
            Span::from(" stay"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm Quit")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(dialog, popup);
}
