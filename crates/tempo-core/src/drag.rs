use crate::slots::SLOT_COUNT;

/// Pointer travel before a press
/// becomes a drag instead of a
/// click.
pub const DRAG_THRESHOLD_PX: f64 = 2.0;

/// Commit throttle, roughly one
/// store mutation per frame.
pub const COMMIT_THROTTLE_MS: f64 =
  16.0;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum DragHandle {
  /// Top edge, stretches the start.
  Start,
  /// Bottom edge, stretches the end.
  End,
  /// Card body, moves the whole
  /// task.
  Move
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum DragPhase {
  Idle,
  PotentialDrag,
  Dragging
}

/// Full slots contained in an
/// accumulated pixel delta, plus
/// the remainder carried forward.
/// Truncates toward zero so up and
/// down behave symmetrically.
pub fn slots_from_delta(
  accumulated: f64,
  slot_height: f64
) -> (i64, f64) {
  if slot_height <= 0.0 {
    return (0, accumulated);
  }
  let slots = (accumulated
    / slot_height)
    .trunc() as i64;
  let remainder = accumulated
    - slots as f64 * slot_height;
  (slots, remainder)
}

/// One press-to-release gesture on a
/// task card. Listeners are attached
/// while the phase is not `Idle` and
/// detached on release; the phase
/// machine itself stays pure so it
/// can be tested without a DOM.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
  phase:          DragPhase,
  handle:         DragHandle,
  origin_y:       f64,
  current_y:      f64,
  last_commit_ms: f64,
  dragged:        bool
}

impl DragGesture {
  pub fn begin(
    handle: DragHandle,
    y: f64
  ) -> Self {
    Self {
      phase: DragPhase::PotentialDrag,
      handle,
      origin_y: y,
      current_y: y,
      last_commit_ms: 0.0,
      dragged: false
    }
  }

  pub fn phase(&self) -> DragPhase {
    self.phase
  }

  pub fn handle(&self) -> DragHandle {
    self.handle
  }

  /// True once the threshold was
  /// ever crossed; the click that
  /// follows a real drag must not
  /// open the editor.
  pub fn dragged(&self) -> bool {
    self.dragged
  }

  /// Visual displacement since the
  /// last committed rebase.
  pub fn offset_px(&self) -> f64 {
    self.current_y - self.origin_y
  }

  /// Feed a pointer position.
  /// Returns the slot delta to
  /// attempt when a commit is due;
  /// `None` while idle, below the
  /// threshold, inside the throttle
  /// window, or under one full
  /// slot of travel.
  pub fn pointer_move(
    &mut self,
    y: f64,
    now_ms: f64,
    slot_height: f64
  ) -> Option<i64> {
    if self.phase == DragPhase::Idle {
      return None;
    }
    self.current_y = y;

    if self.phase
      == DragPhase::PotentialDrag
    {
      if self.offset_px().abs()
        <= DRAG_THRESHOLD_PX
      {
        return None;
      }
      self.phase =
        DragPhase::Dragging;
      self.dragged = true;
    }

    if now_ms - self.last_commit_ms
      < COMMIT_THROTTLE_MS
    {
      return None;
    }

    let (slots, _) =
      slots_from_delta(
        self.offset_px(),
        slot_height
      );
    (slots != 0).then_some(slots)
  }

  /// Acknowledge an accepted commit:
  /// rebase the origin keeping the
  /// sub-slot remainder so repeated
  /// commits never drift. Rejected
  /// commits skip this and keep
  /// accumulating.
  pub fn commit(
    &mut self,
    slot_height: f64,
    now_ms: f64
  ) {
    let (_, remainder) =
      slots_from_delta(
        self.offset_px(),
        slot_height
      );
    self.origin_y =
      self.current_y - remainder;
    self.last_commit_ms = now_ms;
  }

  /// Pointer released; the sole way
  /// out of a gesture. Returns
  /// whether a drag occurred.
  pub fn release(&mut self) -> bool {
    self.phase = DragPhase::Idle;
    self.dragged
  }
}

/// Applies a committed slot delta to
/// a task's time range. `None` means
/// the increment is silently
/// rejected: it would invert the
/// range or leave the 96-slot day.
pub fn apply_handle(
  handle: DragHandle,
  start_idx: usize,
  end_idx: usize,
  slot_delta: i64
) -> Option<(usize, usize)> {
  let start = start_idx as i64;
  let end = end_idx as i64;
  let last = SLOT_COUNT as i64 - 1;

  let (new_start, new_end) =
    match handle {
      | DragHandle::Move => {
        (
          start + slot_delta,
          end + slot_delta
        )
      }
      | DragHandle::Start => {
        (start + slot_delta, end)
      }
      | DragHandle::End => {
        (start, end + slot_delta)
      }
    };

  if new_start < 0
    || new_end > last
    || new_start >= new_end
  {
    tracing::trace!(
      ?handle,
      slot_delta,
      "drag increment rejected"
    );
    return None;
  }

  Some((
    new_start as usize,
    new_end as usize
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delta_truncates_toward_zero() {
    assert_eq!(
      slots_from_delta(130.0, 80.0),
      (1, 50.0)
    );
    let (slots, remainder) =
      slots_from_delta(-130.0, 80.0);
    assert_eq!(slots, -1);
    assert!(
      (remainder + 50.0).abs()
        < 1e-9
    );
    assert_eq!(
      slots_from_delta(79.9, 80.0).0,
      0
    );
  }

  #[test]
  fn below_threshold_is_a_click() {
    let mut gesture =
      DragGesture::begin(
        DragHandle::Move,
        100.0
      );
    assert_eq!(
      gesture.pointer_move(
        101.5, 1_000.0, 80.0
      ),
      None
    );
    assert_eq!(
      gesture.phase(),
      DragPhase::PotentialDrag
    );
    assert!(!gesture.release());
  }

  #[test]
  fn crossing_threshold_starts_dragging()
  {
    let mut gesture =
      DragGesture::begin(
        DragHandle::Move,
        100.0
      );
    gesture.pointer_move(
      104.0, 1_000.0, 80.0
    );
    assert_eq!(
      gesture.phase(),
      DragPhase::Dragging
    );
    assert!(gesture.dragged());
    assert!(gesture.release());
    assert_eq!(
      gesture.phase(),
      DragPhase::Idle
    );
  }

  #[test]
  fn commits_carry_the_remainder() {
    let mut gesture =
      DragGesture::begin(
        DragHandle::End,
        0.0
      );
    let slots = gesture
      .pointer_move(
        130.0, 1_000.0, 80.0
      );
    assert_eq!(slots, Some(1));
    gesture.commit(80.0, 1_000.0);
    assert!(
      (gesture.offset_px() - 50.0)
        .abs()
        < 1e-9
    );

    // 50 carried + 40 more crosses
    // the next boundary.
    let slots = gesture
      .pointer_move(
        170.0, 2_000.0, 80.0
      );
    assert_eq!(slots, Some(1));
  }

  #[test]
  fn throttle_defers_but_keeps_travel()
  {
    let mut gesture =
      DragGesture::begin(
        DragHandle::Move,
        0.0
      );
    assert_eq!(
      gesture.pointer_move(
        90.0, 1_000.0, 80.0
      ),
      Some(1)
    );
    gesture.commit(80.0, 1_000.0);

    // Within the throttle window
    // nothing commits, travel is
    // not lost.
    assert_eq!(
      gesture.pointer_move(
        180.0, 1_005.0, 80.0
      ),
      None
    );
    // 100 px past the rebased
    // origin is one more slot plus
    // a 20 px remainder.
    assert_eq!(
      gesture.pointer_move(
        180.0, 1_020.0, 80.0
      ),
      Some(1)
    );
  }

  #[test]
  fn move_shifts_both_ends() {
    assert_eq!(
      apply_handle(
        DragHandle::Move,
        36,
        40,
        2
      ),
      Some((38, 42))
    );
    assert_eq!(
      apply_handle(
        DragHandle::Move,
        36,
        40,
        -2
      ),
      Some((34, 38))
    );
    // Leaving the day is rejected,
    // not clamped halfway.
    assert_eq!(
      apply_handle(
        DragHandle::Move,
        0,
        4,
        -1
      ),
      None
    );
    assert_eq!(
      apply_handle(
        DragHandle::Move,
        92,
        95,
        1
      ),
      None
    );
  }

  #[test]
  fn start_handle_cannot_reach_the_end()
  {
    assert_eq!(
      apply_handle(
        DragHandle::Start,
        36,
        40,
        3
      ),
      Some((39, 40))
    );
    assert_eq!(
      apply_handle(
        DragHandle::Start,
        36,
        40,
        4
      ),
      None
    );
    assert_eq!(
      apply_handle(
        DragHandle::Start,
        2,
        40,
        -3
      ),
      None
    );
  }

  #[test]
  fn end_handle_respects_day_bounds()
  {
    assert_eq!(
      apply_handle(
        DragHandle::End,
        36,
        40,
        -3
      ),
      Some((36, 37))
    );
    assert_eq!(
      apply_handle(
        DragHandle::End,
        36,
        40,
        -4
      ),
      None
    );
    assert_eq!(
      apply_handle(
        DragHandle::End,
        36,
        94,
        2
      ),
      None
    );
  }
}
