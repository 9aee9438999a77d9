// Licensed under the Apache-2.0 license

//! Ownership maps from owner name to child rows.
//!
//! Built once after loading so the emitter can look up a block's registers
//! and a register's fields without rescanning the tables. Keys are compared
//! by exact string equality. A name with no children is an empty group,
//! not an error.

use crate::schema::{Field, Register, RegisterSpec};
use std::collections::HashMap;

/// Child rows grouped by the name of their owner, in sheet order.
#[derive(Debug)]
pub struct Groups<'a, T> {
    groups: HashMap<&'a str, Vec<&'a T>>,
}

impl<'a, T> Groups<'a, T> {
    /// Groups `items` by the owner name returned from `owner`.
    pub fn build<I, F>(items: I, owner: F) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&'a T) -> &'a str,
    {
        let mut groups: HashMap<&'a str, Vec<&'a T>> = HashMap::new();
        for item in items {
            groups.entry(owner(item)).or_default().push(item);
        }
        Self { groups }
    }

    /// The children of `owner`, or an empty slice if it has none.
    pub fn get(&self, owner: &str) -> &[&'a T] {
        self.groups.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Registers by block name and fields by register name.
#[derive(Debug)]
pub struct SpecIndex<'a> {
    pub registers_by_block: Groups<'a, Register>,
    pub fields_by_register: Groups<'a, Field>,
}

impl<'a> SpecIndex<'a> {
    pub fn new(spec: &'a RegisterSpec) -> Self {
        Self {
            registers_by_block: Groups::build(&spec.registers, |r| r.block.as_str()),
            fields_by_register: Groups::build(&spec.fields, |f| f.register.as_str()),
        }
    }

    pub fn registers(&self, block: &str) -> &[&'a Register] {
        self.registers_by_block.get(block)
    }

    /// Fields of `register`, sorted by ascending LSB. Fields sharing an
    /// LSB keep their sheet order.
    pub fn fields_sorted(&self, register: &str) -> Vec<&'a Field> {
        let mut fields = self.fields_by_register.get(register).to_vec();
        fields.sort_by_key(|f| f.lsb);
        fields
    }
}
