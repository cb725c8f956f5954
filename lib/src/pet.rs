/// A virtual pet. Starts out hungry and bored.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
  pub name: String,
  pub age: u32,
  pub weight: f64,
  pub photo: String,
  pub hungry: bool,
  pub bored: bool,
}

impl Pet {
  pub fn new(name: impl Into<String>, age: u32, weight: f64, photo: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      age,
      weight,
      photo: photo.into(),
      hungry: true,
      bored: true,
    }
  }

  pub fn feed(&mut self) {
    self.hungry = false;
    self.weight += 0.1;
  }

  pub fn play(&mut self) {
    self.bored = false;
  }

  /// Greeting followed by how the pet feels.
  pub fn speak(&self) -> Vec<String> {
    let mut lines = vec![format!(
      "Hello, my name is {} and I look like this: {}",
      self.name, self.photo
    )];
    if self.hungry {
      lines.push("I am hungry".to_string());
    }
    if self.bored {
      lines.push("I am bored".to_string());
    }
    if !self.hungry && !self.bored {
      lines.push("I am happy".to_string());
    }
    lines
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rex() -> Pet {
    Pet::new("Rex", 3, 12.0, "(=^.^=)")
  }

  #[test]
  fn test_new_pet_is_hungry_and_bored() {
    let pet = rex();
    assert!(pet.hungry && pet.bored);
    assert_eq!(
      pet.speak(),
      vec![
        "Hello, my name is Rex and I look like this: (=^.^=)",
        "I am hungry",
        "I am bored",
      ]
    );
  }

  #[test]
  fn test_feed() {
    let mut pet = rex();
    pet.feed();
    assert!(!pet.hungry);
    assert!((pet.weight - 12.1).abs() < 1e-9);
    assert_eq!(pet.speak()[1..], ["I am bored"]);

    pet.feed();
    assert!((pet.weight - 12.2).abs() < 1e-9);
  }

  #[test]
  fn test_play() {
    let mut pet = rex();
    pet.play();
    assert!(!pet.bored);
    assert_eq!(pet.speak()[1..], ["I am hungry"]);
  }

  #[test]
  fn test_fed_and_played_is_happy() {
    let mut pet = rex();
    pet.feed();
    pet.play();
    assert_eq!(pet.speak()[1..], ["I am happy"]);
  }
}
