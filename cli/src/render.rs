//! Plain-text rendering of pets for the terminal.

use std::io::{self, Write};

use pets_core::Pet;

pub fn write_pet(out: &mut impl Write, pet: &Pet) -> io::Result<()> {
    writeln!(out, "{} (#{})", pet.name, pet.id)?;
    writeln!(out, "  Breed: {}", pet.breed)?;
    writeln!(out, "  Age: {} years", pet.age)
}

/// The filtered view, one block per pet.
pub fn write_list(out: &mut impl Write, pets: &[&Pet]) -> io::Result<()> {
    if pets.is_empty() {
        return writeln!(out, "No pets available");
    }
    for pet in pets {
        write_pet(out, pet)?;
    }
    Ok(())
}
