use crate::pet::Pet;

/// Looks in on a pet, optionally feeding it and playing with it first.
pub struct Visit {
  pet: Pet,
  feed: bool,
  play: bool,
}

impl Visit {
  pub fn new(pet: Pet, feed: bool, play: bool) -> Self {
    Self { pet, feed, play }
  }

  /// What the pet says at the end of the visit.
  pub fn run(mut self) -> Vec<String> {
    if self.feed {
      self.pet.feed();
      tracing::debug!("fed {}, now weighs {:.1}", self.pet.name, self.pet.weight);
    }
    if self.play {
      self.pet.play();
    }
    self.pet.speak()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_visit() {
    let pet = Pet::new("Tom", 2, 4.0, ":3");
    assert_eq!(Visit::new(pet.clone(), true, true).run()[1], "I am happy");
    assert_eq!(Visit::new(pet.clone(), false, true).run()[1..], ["I am hungry"]);
    assert_eq!(Visit::new(pet, false, false).run().len(), 3);
  }
}
