use proptest::prelude::*;
use rtransect::config::KeyBindings;
use rtransect::display::RecordingSurface;
use rtransect::event::{InputEvent, MouseButton};
use rtransect::im::F32Im;
use rtransect::{rasterize_section, ControllerState, InputController, SelectionHistory, Waypoint};

fn click(x: f64, y: f64) -> InputEvent {
    InputEvent::Click { x, y, button: MouseButton::Primary }
}

fn undo() -> InputEvent {
    InputEvent::Click { x: 0.0, y: 0.0, button: MouseButton::Secondary }
}

fn overlay_cells(im: &F32Im, value: f32) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    for y in 0..im.h {
        for x in 0..im.w {
            let v = im.arr[y * im.s + x];
            if !v.is_nan() {
                assert_eq!(v, value);
                out.push((x as i64, y as i64));
            }
        }
    }
    out
}

#[test]
fn full_session_over_a_raster() {
    let raster = F32Im::from_fn(20, 10, |x, y| (x * y) as f32);
    let (_, vmax) = rtransect::im::RasterSource::value_range(&raster).unwrap();
    let mut c = InputController::new(&raster, RecordingSurface::new(), KeyBindings::default()).unwrap();

    c.handle_event(click(2.3, 2.8));
    c.handle_event(click(12.9, 2.1));
    c.handle_event(InputEvent::ClickOutside);
    c.handle_event(click(15.0, 9.99));
    c.handle_event(click(0.1, 0.1));
    c.handle_event(undo());

    let over = c.renderer().over_value();
    assert!(over > vmax);

    // The overlay on the surface matches the transect the history would publish.
    let mut expected = c.history().finalize().iter().collect::<Vec<_>>();
    expected.sort_by_key(|&(x, y)| (y, x));
    expected.dedup();
    let shown = c.surface().overlay.as_ref().unwrap();
    assert_eq!(overlay_cells(shown, over), expected);

    let t = c.handle_event(InputEvent::key("enter")).unwrap();
    assert_eq!(c.state(), ControllerState::Finalized);
    assert_eq!(t.first(), Some((2, 2)));
    assert_eq!(*t.xinds.last().unwrap(), 15);
    assert_eq!(*t.yinds.last().unwrap(), 9);
    assert_eq!(t.len(), 1 + 10 + 7);
}

#[test]
fn click_on_far_edge_never_publishes_a_cell_past_the_raster() {
    let raster = F32Im::filled(10, 10, 0.5);
    let mut c = InputController::new(&raster, RecordingSurface::new(), KeyBindings::default()).unwrap();

    let (x, y) = rtransect::viewer::pointer_to_data([100.0, 20.0], [0.0, 0.0], [100.0, 100.0], 10, 10);
    c.handle_event(click(2.0, 2.0));
    c.handle_event(click(x, y));
    c.handle_event(click(10.0, 2.0));

    let t = c.handle_event(InputEvent::key("enter")).unwrap();
    assert_eq!(t.xinds, vec![2, 3, 4, 5, 6, 7, 8, 9]);
    assert!(t.iter().all(|(x, y)| (0..10).contains(&x) && (0..10).contains(&y)));
}

#[test]
fn reset_mid_session_then_finalize_is_empty() {
    let raster = F32Im::filled(5, 5, 1.0);
    let mut c = InputController::new(&raster, RecordingSurface::new(), KeyBindings::default()).unwrap();
    c.handle_event(click(0.5, 0.5));
    c.handle_event(click(4.5, 4.5));
    c.handle_event(InputEvent::key("backspace"));

    let shown = c.surface().overlay.as_ref().unwrap();
    assert!(shown.arr.iter().all(|v| v.is_nan()));
    assert_eq!(c.surface().polylines[0].len(), 0);

    let t = c.handle_event(InputEvent::key("enter")).unwrap();
    assert!(t.is_empty());
}

#[derive(Debug, Clone)]
enum Op {
    Append(f64, f64),
    Undo,
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0.0..40.0f64, 0.0..40.0f64).prop_map(|(x, y)| Op::Append(x, y)),
        3 => Just(Op::Undo),
        1 => Just(Op::Reset),
    ]
}

proptest! {
    #[test]
    fn sections_lag_waypoints_by_one(ops in prop::collection::vec(op(), 0..40)) {
        let mut h = SelectionHistory::new();
        for op in ops {
            match op {
                Op::Append(x, y) => { h.append(x, y); }
                Op::Undo => { h.undo(); }
                Op::Reset => { h.reset(); }
            }
            prop_assert_eq!(h.sections().len(), h.waypoints().len().saturating_sub(1));
        }
    }

    #[test]
    fn transect_length_counts_shared_endpoints_once(
        pts in prop::collection::vec((0.0..60.0f64, 0.0..60.0f64), 2..10)
    ) {
        let mut h = SelectionHistory::new();
        for &(x, y) in &pts {
            h.append(x, y);
        }
        let t = h.finalize();
        let expected = 1 + h.sections().iter().map(|s| s.len() - 1).sum::<usize>();
        prop_assert_eq!(t.len(), expected);
        prop_assert_eq!(t.first(), Some(h.waypoints()[0].cell()));
        prop_assert_eq!(t, h.finalize());
    }

    #[test]
    fn section_length_is_chebyshev_plus_one(
        a in (0i32..100, 0i32..100),
        b in (0i32..100, 0i32..100),
    ) {
        let p0 = Waypoint::snapped(a.0 as f64, a.1 as f64);
        let p1 = Waypoint::snapped(b.0 as f64, b.1 as f64);
        let s = rasterize_section(p0, p1);

        let cheb = (a.0 - b.0).abs().max((a.1 - b.1).abs()) as usize;
        prop_assert_eq!(s.len(), cheb + 1);
        prop_assert_eq!(s.iter().next(), Some(p0.cell()));
        prop_assert_eq!(s.iter().last(), Some(p1.cell()));
    }
}
