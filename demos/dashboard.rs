//! Dashboard Example - Live terminal dashboard
//!
//! This example runs the full interactive loop:
//! - Raw-mode session on the alternate screen
//! - Two panels negotiating the width between them
//! - Frame-to-frame cell diffing, so steady frames cost nothing
//! - Resize handling and mouse clicks
//!
//! Press 'q' or Esc to quit.
//!
//! Run with: cargo run --example dashboard

use std::io;
use std::rc::Rc;
use std::time::Duration;

use weft_tui::terminal::{poll_event, InputEvent, Key, Terminal};
use weft_tui::{
    BorderStyle, Canvas, Dimension, DiffPresenter, Direction, Element, ListMarker, Rect, Rgba,
    Typesetter,
};

fn main() {
    let mut term = match Terminal::new() {
        Ok(term) => term,
        Err(e) => {
            eprintln!("Failed to open terminal session: {}", e);
            return;
        }
    };

    if let Err(e) = run(&mut term) {
        let _ = term.restore();
        eprintln!("Dashboard error: {}", e);
        return;
    }

    let _ = term.restore();
    println!("Bye.");
}

fn run(term: &mut Terminal) -> io::Result<()> {
    term.enable_mouse()?;

    let typesetter = Rc::new(Typesetter::new());
    let mut root = build_ui(&typesetter);
    let mut presenter = DiffPresenter::new();

    let mut ticks = 0u64;
    loop {
        let size = term.size()?;
        let mut canvas = Canvas::new(size.width, size.height);
        root.render(&mut canvas, Rect::new(0, 0, size.width, size.height));
        presenter.present(&canvas)?;

        match poll_event(Duration::from_millis(33))? {
            Some(InputEvent::Key(key)) => match key.key {
                Key::Char('q') | Key::Esc => break,
                Key::Char('c') if key.modifiers.ctrl => break,
                _ => {}
            },
            Some(InputEvent::Mouse(mouse)) => {
                set_status(&mut root, format!("click at {},{} - q quits", mouse.x, mouse.y));
            }
            // the size query at the top of the loop picks the new size up;
            // the presenter drops its baseline on its own
            Some(InputEvent::Resize(_, _)) => {}
            _ => {}
        }

        ticks += 1;
        if ticks % 30 == 0 {
            set_status(&mut root, format!("{} ticks - q quits", ticks));
        }
    }

    Ok(())
}

fn build_ui(typesetter: &Rc<Typesetter>) -> Element {
    let mut root = Element::flow(Direction::Vertical);
    root.update_style(|s| {
        s.width = Dimension::Percent(100.0);
        s.height = Dimension::Percent(100.0);
        s.border = Some(BorderStyle::Rounded);
        s.border_color = Rgba::CYAN;
        s.bg = Rgba::rgb(20, 20, 30);
    });
    root.set_title(Some("weft dashboard".into())).unwrap();

    let mut panels = Element::flow(Direction::Horizontal);

    let mut tasks = Element::flow(Direction::Vertical);
    tasks.update_style(|s| s.border = Some(BorderStyle::Single));
    tasks.set_title(Some("tasks".into())).unwrap();
    let mut list = Element::list(ListMarker::Numbered);
    for entry in ["measure the tree", "grant the widths", "present the diff"] {
        list.push_child(label(entry, typesetter)).unwrap();
    }
    tasks.push_child(list).unwrap();
    panels.push_child(tasks).unwrap();

    let mut log = Element::flow(Direction::Vertical);
    log.update_style(|s| s.border = Some(BorderStyle::Single));
    log.set_title(Some("log".into())).unwrap();
    let mut entries = Element::list(ListMarker::Bullet);
    for entry in ["session opened", "mouse capture on", "distribution settled"] {
        entries.push_child(label(entry, typesetter)).unwrap();
    }
    log.push_child(entries).unwrap();
    panels.push_child(log).unwrap();

    root.push_child(panels).unwrap();

    let mut status = Element::text("0 ticks - q quits", typesetter.clone());
    status.update_style(|s| s.fg = Rgba::GRAY);
    root.push_child(status).unwrap();

    root
}

/// A text leaf sized to its own content instead of the parent's width.
fn label(content: &str, typesetter: &Rc<Typesetter>) -> Element {
    let mut el = Element::text(content, typesetter.clone());
    el.update_style(|s| s.width = Dimension::Auto);
    el
}

fn set_status(root: &mut Element, message: String) {
    if let Ok(status) = root.child_mut(1) {
        let _ = status.set_text(message);
    }
}
