use crate::utils::time_utils::current_timestamp;

/**
 * Just count the amount of times the comment form
 * is posted per unit of time, supposed to block it
 * entirely for a specific "block time" when that happens.
 */
pub struct BasicRateLimiter {
  counter: u32,
  last_update: i64,
  is_limited: bool,
  max_requests: u32,
  max_requests_time: u32,
  block_duration: u32
}

impl BasicRateLimiter {

  pub fn new(
    max_requests: u32,
    max_requests_time: u32,
    block_duration: u32
  ) -> Self {
    Self::starting_at(max_requests, max_requests_time, block_duration, current_timestamp())
  }

  fn starting_at(
    max_requests: u32,
    max_requests_time: u32,
    block_duration: u32,
    now: i64
  ) -> Self {
    Self {
      counter: 0,
      last_update: now,
      is_limited: false,
      max_requests,
      max_requests_time,
      block_duration
    }
  }

  pub fn is_locked(&self) -> bool {
    self.is_limited
  }

  // If currently locked, check if past block_duration.
  // Check if past max_request_time otherwise.
  fn is_expired_at(&self, now: i64) -> bool {
    let window = if self.is_locked() {
      self.block_duration
    } else {
      self.max_requests_time
    };
    now - self.last_update >= i64::from(window)
  }

  // Counts one request, returns true if we're now
  // rate limited. This used to take self by value which
  // made no sense at all behind a lock, lol.
  pub fn update(&mut self) -> bool {
    self.update_at(current_timestamp())
  }

  fn update_at(&mut self, now: i64) -> bool {
    if self.is_expired_at(now) {
      // Reset, and this request counts as the first one:
      self.counter = 1;
      self.last_update = now;
      self.is_limited = false;
    } else if !self.is_limited {
      self.counter += 1;
      // Are we above the rate limit?
      if self.counter > self.max_requests {
        self.is_limited = true;
        // Block starts now:
        self.last_update = now;
      }
    }
    self.is_limited
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn allows_requests_under_the_limit() {
    let mut sut = BasicRateLimiter::starting_at(3, 60, 60, 1000);
    assert!(!sut.update_at(1001));
    assert!(!sut.update_at(1002));
    assert!(!sut.update_at(1003));
    assert!(!sut.is_locked());
  }

  #[test]
  fn locks_once_the_limit_is_passed() {
    let mut sut = BasicRateLimiter::starting_at(2, 60, 30, 1000);
    sut.update_at(1001);
    sut.update_at(1002);
    assert!(sut.update_at(1003));
    // Still locked during the block duration:
    assert!(sut.update_at(1020));
  }

  #[test]
  fn unlocks_after_block_duration() {
    let mut sut = BasicRateLimiter::starting_at(1, 60, 30, 1000);
    sut.update_at(1001);
    assert!(sut.update_at(1002));
    assert!(!sut.update_at(1032));
  }

  #[test]
  fn counter_resets_after_the_window() {
    let mut sut = BasicRateLimiter::starting_at(2, 10, 30, 1000);
    sut.update_at(1001);
    sut.update_at(1002);
    // Window is over, we start counting again:
    assert!(!sut.update_at(1011));
    assert!(!sut.update_at(1012));
  }

}
