//! Tables of buttons living in a desktop.

use std::cell::Cell;
use std::rc::Rc;

use spark_desk::{
    AttachOptions, Button, CellSpan, Desktop, Event, FloatRect, FrameRecorder, MouseButton,
    Table, Vec2, View, Widget, WidgetState,
};

fn fill_expand() -> AttachOptions {
    AttachOptions::FILL | AttachOptions::EXPAND
}

fn screen() -> Desktop {
    Desktop::new(FloatRect::new(0.0, 0.0, 80.0, 24.0))
}

/// A table holding a single button that fills it, allocated at `rect`.
fn window(rect: FloatRect) -> (Rc<Table>, Rc<Button>) {
    let table = Table::new();
    let button = Button::new(Vec2::new(4.0, 1.0));
    table.attach(
        button.clone(),
        CellSpan::single(0, 0),
        fill_expand(),
        fill_expand(),
        Vec2::ZERO,
    );
    table.allocate_size(rect);
    (table, button)
}

fn click_counter(button: &Button) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let count_clone = count.clone();
    button.on_click(move |_| count_clone.set(count_clone.get() + 1));
    count
}

fn click(desktop: &Desktop, x: f32, y: f32) {
    desktop.handle_event(&Event::mouse_pressed(MouseButton::Left, x, y));
    desktop.handle_event(&Event::mouse_released(MouseButton::Left, x, y));
}

#[test]
fn test_button_row_layout_and_click() {
    let table = Table::new();
    let ok = Button::new(Vec2::new(6.0, 1.0));
    let cancel = Button::new(Vec2::new(6.0, 1.0));
    table.attach(ok.clone(), CellSpan::single(0, 0), fill_expand(), AttachOptions::FILL, Vec2::ZERO);
    table.attach(cancel.clone(), CellSpan::single(1, 0), fill_expand(), AttachOptions::FILL, Vec2::ZERO);

    // Default button padding is one cell left and right
    assert_eq!(table.requisition(), Vec2::new(16.0, 1.0));

    table.allocate_size(FloatRect::new(10.0, 5.0, 40.0, 3.0));
    assert_eq!(ok.allocation(), FloatRect::new(10.0, 5.0, 20.0, 1.0));
    assert_eq!(cancel.allocation(), FloatRect::new(30.0, 5.0, 20.0, 1.0));

    let desktop = screen();
    desktop.add(table.clone());

    let ok_clicks = click_counter(&ok);
    let cancel_clicks = click_counter(&cancel);

    click(&desktop, 35.0, 5.0);
    assert_eq!(cancel_clicks.get(), 1);
    assert_eq!(ok_clicks.get(), 0);
}

#[test]
fn test_clicking_a_lower_window_raises_it_and_clicks_its_button() {
    let (back, back_button) = window(FloatRect::new(0.0, 0.0, 20.0, 5.0));
    let (front, front_button) = window(FloatRect::new(10.0, 2.0, 20.0, 5.0));

    let desktop = screen();
    desktop.add(back.clone());
    desktop.add(front.clone());

    let back_clicks = click_counter(&back_button);
    let front_clicks = click_counter(&front_button);

    click(&desktop, 5.0, 1.0);

    let top = desktop.top().unwrap();
    assert_eq!(top.allocation(), back.allocation());
    assert_eq!(back_clicks.get(), 1);
    assert_eq!(front_clicks.get(), 0);

    // The overlap now belongs to the raised window
    click(&desktop, 15.0, 3.0);
    assert_eq!(back_clicks.get(), 2);
    assert_eq!(front_clicks.get(), 0);
}

#[test]
fn test_growing_a_button_relayouts_its_table() {
    let table = Table::new();
    let a = Button::new(Vec2::new(4.0, 1.0));
    let b = Button::new(Vec2::new(4.0, 1.0));
    table.attach(a.clone(), CellSpan::single(0, 0), AttachOptions::FILL, AttachOptions::FILL, Vec2::ZERO);
    table.attach(b.clone(), CellSpan::single(1, 0), AttachOptions::FILL, AttachOptions::FILL, Vec2::ZERO);
    assert_eq!(table.allocation(), FloatRect::new(0.0, 0.0, 12.0, 1.0));
    assert_eq!(b.allocation().left, 6.0);

    a.set_content_size(Vec2::new(10.0, 1.0));

    assert_eq!(table.allocation(), FloatRect::new(0.0, 0.0, 18.0, 1.0));
    assert_eq!(a.allocation(), FloatRect::new(0.0, 0.0, 12.0, 1.0));
    assert_eq!(b.allocation().left, 12.0);
}

#[test]
fn test_close_button_removes_its_window_on_next_event() {
    let desktop = Rc::new(screen());
    let (window, close) = window(FloatRect::new(0.0, 0.0, 10.0, 3.0));
    desktop.add(window.clone());

    let desktop_weak = Rc::downgrade(&desktop);
    let window_weak = Rc::downgrade(&window);
    close.on_click(move |_| {
        if let (Some(desktop), Some(window)) = (desktop_weak.upgrade(), window_weak.upgrade()) {
            desktop.remove(window);
        }
    });

    click(&desktop, 2.0, 1.0);
    assert_eq!(desktop.len(), 1);

    let mut target = FrameRecorder::new(View::default());
    desktop.expose(&mut target);
    assert!(desktop.is_empty());
    assert!(target.fills().is_empty());
}

#[test]
fn test_hover_moves_between_windows() {
    let (left, left_button) = window(FloatRect::new(0.0, 0.0, 10.0, 3.0));
    let (right, right_button) = window(FloatRect::new(20.0, 0.0, 10.0, 3.0));

    let desktop = screen();
    desktop.add(left.clone());
    desktop.add(right.clone());

    desktop.handle_event(&Event::mouse_moved(5.0, 1.0));
    assert_eq!(left_button.state(), WidgetState::Prelight);
    assert_eq!(right_button.state(), WidgetState::Normal);

    desktop.handle_event(&Event::mouse_moved(25.0, 1.0));
    assert_eq!(left_button.state(), WidgetState::Normal);
    assert_eq!(right_button.state(), WidgetState::Prelight);
}

#[test]
fn test_expose_paints_windows_back_to_front() {
    let (back, back_button) = window(FloatRect::new(0.0, 0.0, 20.0, 5.0));
    let (front, front_button) = window(FloatRect::new(10.0, 2.0, 20.0, 5.0));

    let desktop = screen();
    desktop.add(back.clone());
    desktop.add(front.clone());

    let mut target = FrameRecorder::new(View::default());
    desktop.expose(&mut target);

    assert_eq!(
        target.fills(),
        vec![back_button.allocation(), front_button.allocation()]
    );
    assert!(!back.core().is_invalidated());
    assert!(!front_button.core().is_invalidated());
}

#[test]
fn test_refresh_all_relayouts_after_content_changes() {
    let (window, button) = window(FloatRect::new(0.0, 0.0, 10.0, 3.0));
    let desktop = screen();
    desktop.add(window.clone());

    let mut target = FrameRecorder::new(View::default());
    desktop.expose(&mut target);
    assert!(!button.core().is_invalidated());

    desktop.refresh_all();

    assert!(button.core().is_invalidated());
    assert!(window.core().is_invalidated());
    // Root keeps at least its previous size
    assert_eq!(window.allocation(), FloatRect::new(0.0, 0.0, 10.0, 3.0));
    assert_eq!(button.allocation(), FloatRect::new(0.0, 0.0, 10.0, 3.0));
}
