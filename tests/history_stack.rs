use drawing_app::history::HistoryStack;
use drawing_app::stroke::{StrokeId, StrokePath};
use drawing_app::{CanvasError, StrokeRef};
use egui::{Color32, pos2};

fn stroke(x: f32) -> StrokePath {
    StrokePath::new(Color32::BLACK, 3.0, vec![pos2(x, 0.0), pos2(x, 5.0)]).unwrap()
}

fn ids(strokes: &[StrokeRef]) -> Vec<StrokeId> {
    strokes.iter().map(|s| s.id()).collect()
}

#[test]
fn test_commits_keep_order_and_length() {
    let mut history = HistoryStack::new();
    let mut expected = Vec::new();
    for i in 0..25 {
        let committed = history.commit(stroke(i as f32));
        expected.push(committed.id());
        assert_eq!(history.committed().len(), i + 1);
    }
    assert_eq!(ids(history.committed()), expected);
    assert_eq!(ids(&history.snapshot_visible()), expected);
}

#[test]
fn test_undo_then_redo_restores_committed() {
    let mut history = HistoryStack::new();
    for i in 0..4 {
        history.commit(stroke(i as f32));
    }
    let before = ids(history.committed());

    let undone = history.undo().unwrap();
    assert_eq!(Some(undone.id()), before.last().copied());
    let redone = history.redo().unwrap();
    assert_eq!(redone.id(), undone.id());

    assert_eq!(ids(history.committed()), before);
    assert!(history.redo_buffer().is_empty());
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut history = HistoryStack::new();
    history.commit(stroke(1.0));
    history.commit(stroke(2.0));
    history.commit(stroke(3.0));
    history.undo().unwrap();
    history.undo().unwrap();
    assert_eq!(history.redo_buffer().len(), 2);

    history.commit(stroke(4.0));
    assert!(history.redo_buffer().is_empty());
    assert!(matches!(history.redo(), Err(CanvasError::EmptyHistory(_))));
    assert_eq!(history.committed().len(), 2);
}

#[test]
fn test_boundary_calls_leave_state_unchanged() {
    let mut history = HistoryStack::new();
    assert!(history.undo().is_err());
    assert!(history.redo().is_err());
    assert!(history.committed().is_empty());
    assert!(history.redo_buffer().is_empty());

    history.commit(stroke(1.0));
    let committed = ids(history.committed());
    assert!(history.redo().is_err());
    assert_eq!(ids(history.committed()), committed);
    assert!(history.redo_buffer().is_empty());

    history.undo().unwrap();
    let redo = ids(history.redo_buffer());
    assert!(history.undo().is_err());
    assert!(history.committed().is_empty());
    assert_eq!(ids(history.redo_buffer()), redo);
}

#[test]
fn test_commit_undo_commit_scenario() {
    let mut history = HistoryStack::new();
    let a = history.commit(stroke(1.0)).id();
    let b = history.commit(stroke(2.0)).id();

    history.undo().unwrap();
    assert_eq!(ids(history.committed()), vec![a]);
    assert_eq!(ids(history.redo_buffer()), vec![b]);

    let c = history.commit(stroke(3.0)).id();
    assert_eq!(ids(history.committed()), vec![a, c]);
    assert!(history.redo_buffer().is_empty());
}

#[test]
fn test_stacks_stay_disjoint() {
    let mut history = HistoryStack::new();
    for i in 0..5 {
        history.commit(stroke(i as f32));
    }
    // Mixed walk over the history
    for step in [true, true, false, true, true, true, false, false, true] {
        if step {
            let _ = history.undo();
        } else {
            let _ = history.redo();
        }
        let committed = ids(history.committed());
        let redo = ids(history.redo_buffer());
        assert_eq!(committed.len() + redo.len(), 5);
        assert!(committed.iter().all(|id| !redo.contains(id)));
    }
}
