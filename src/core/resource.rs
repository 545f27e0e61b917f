//! Shared workshop resources: reconfigurable tools and depletable materials.
//!
//! Both are handed around as `Arc`s. Blueprints only keep weak references, so
//! the code that built a resource decides how long it lives.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::ResourceError;

/// Anything that carries a display name.
pub trait Nameable {
    /// Resource name.
    fn name(&self) -> &str;
}

/// Resources that can be reconfigured with opaque key/value parameters.
pub trait Adaptable {
    /// Apply configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotOperational`] if the resource cannot accept
    /// a new configuration.
    fn adapt(&self, params: &BTreeMap<String, String>) -> Result<(), ResourceError>;
}

/// Category of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Unspecified.
    None,
    /// Welding station.
    Welder,
    /// Assembly station.
    Assembler,
    /// Paint booth.
    Painter,
    /// Optical scanner.
    Scanner,
    /// Calibration rig.
    Calibrator,
    /// Cutting tool.
    Cutter,
    /// Additive printer.
    Printer3d,
}

/// Category of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Unspecified.
    None,
    /// Metal stock.
    Metal,
    /// Plastic stock.
    Plastic,
    /// Composite stock.
    Composite,
    /// Liquids such as paint.
    Liquid,
    /// Gases.
    Gas,
    /// Electronic components.
    Electronic,
}

/// A reusable tool. Starts operational; a breakdown is permanent.
#[derive(Debug)]
pub struct Tool {
    name: String,
    kind: ToolKind,
    operational: AtomicBool,
}

impl Tool {
    /// Create an operational tool.
    pub fn new(name: impl Into<String>, kind: ToolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            operational: AtomicBool::new(true),
        }
    }

    /// Tool category.
    #[must_use]
    pub const fn kind(&self) -> ToolKind {
        self.kind
    }

    /// Whether the tool can still be acquired.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.operational.load(Ordering::Acquire)
    }

    /// Mark the tool as broken. Idempotent; there is no repair.
    pub fn breakdown(&self) {
        if self.operational.swap(false, Ordering::AcqRel) {
            info!(tool = %self.name, "tool broke down");
        }
    }
}

impl Nameable for Tool {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Adaptable for Tool {
    fn adapt(&self, params: &BTreeMap<String, String>) -> Result<(), ResourceError> {
        if !self.is_operational() {
            return Err(ResourceError::NotOperational(self.name.clone()));
        }
        debug!(tool = %self.name, "adapting tool");
        for (key, value) in params {
            debug!(tool = %self.name, key = %key, value = %value, "setting parameter");
        }
        Ok(())
    }
}

/// A depletable stock of material.
#[derive(Debug)]
pub struct Material {
    name: String,
    kind: MaterialKind,
    quantity: Mutex<f64>,
}

impl Material {
    /// Create a material holding `quantity` units. Negative input is clamped to zero.
    pub fn new(name: impl Into<String>, kind: MaterialKind, quantity: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            quantity: Mutex::new(quantity.max(0.0)),
        }
    }

    /// Material category.
    #[must_use]
    pub const fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Units currently on hand.
    #[must_use]
    pub fn quantity(&self) -> f64 {
        *self.quantity.lock()
    }

    /// Take `amount` units. All-or-nothing: on failure the quantity is unchanged.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidAmount`] if `amount` is negative or not finite
    /// - [`ResourceError::InsufficientQuantity`] if `amount` exceeds the stock
    pub fn consume(&self, amount: f64) -> Result<(), ResourceError> {
        check_amount(amount)?;
        let mut quantity = self.quantity.lock();
        if *quantity < amount {
            return Err(ResourceError::InsufficientQuantity {
                name: self.name.clone(),
                requested: amount,
                available: *quantity,
            });
        }
        *quantity -= amount;
        debug!(material = %self.name, amount, remaining = *quantity, "material consumed");
        Ok(())
    }

    /// Add `amount` units. There is no upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAmount`] if `amount` is negative or not finite.
    pub fn replenish(&self, amount: f64) -> Result<(), ResourceError> {
        check_amount(amount)?;
        let mut quantity = self.quantity.lock();
        *quantity += amount;
        debug!(material = %self.name, amount, total = *quantity, "material replenished");
        Ok(())
    }

    /// Return previously consumed units to the stock.
    ///
    /// # Errors
    ///
    /// Same as [`Material::replenish`].
    pub fn release(&self, amount: f64) -> Result<(), ResourceError> {
        info!(material = %self.name, amount, "releasing material");
        self.replenish(amount)
    }
}

impl Nameable for Material {
    fn name(&self) -> &str {
        &self.name
    }
}

fn check_amount(amount: f64) -> Result<(), ResourceError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ResourceError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_within_stock() {
        let metal = Material::new("Metal", MaterialKind::Metal, 100.0);
        metal.consume(20.0).unwrap();
        assert!((metal.quantity() - 80.0).abs() < f64::EPSILON);

        metal.consume(80.0).unwrap();
        assert_eq!(metal.quantity(), 0.0);
    }

    #[test]
    fn test_consume_is_all_or_nothing() {
        let plastic = Material::new("Plastic", MaterialKind::Plastic, 50.0);
        let err = plastic.consume(100.0).unwrap_err();
        assert_eq!(
            err,
            ResourceError::InsufficientQuantity {
                name: "Plastic".into(),
                requested: 100.0,
                available: 50.0,
            }
        );
        assert!((plastic.quantity() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        let paint = Material::new("Paint", MaterialKind::Liquid, 20.0);
        assert!(matches!(paint.consume(-1.0), Err(ResourceError::InvalidAmount(_))));
        assert!(matches!(paint.consume(f64::NAN), Err(ResourceError::InvalidAmount(_))));
        assert!(matches!(
            paint.replenish(f64::INFINITY),
            Err(ResourceError::InvalidAmount(_))
        ));
        assert!((paint.quantity() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_replenish_and_release() {
        let paint = Material::new("Paint", MaterialKind::Liquid, 5.0);
        paint.replenish(10.0).unwrap();
        paint.release(2.5).unwrap();
        assert!((paint.quantity() - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_initial_quantity_clamped() {
        let gas = Material::new("Argon", MaterialKind::Gas, -3.0);
        assert_eq!(gas.quantity(), 0.0);
    }

    #[test]
    fn test_adapt_requires_operational_tool() {
        let welder = Tool::new("Welder-01", ToolKind::Welder);
        let params: BTreeMap<String, String> =
            [("power".to_string(), "high".to_string())].into_iter().collect();
        assert!(welder.adapt(&params).is_ok());

        welder.breakdown();
        welder.breakdown();
        assert!(!welder.is_operational());
        assert_eq!(
            welder.adapt(&params),
            Err(ResourceError::NotOperational("Welder-01".into()))
        );
    }

    #[test]
    fn test_tool_metadata() {
        let cutter = Tool::new("Cutter-07", ToolKind::Cutter);
        assert_eq!(cutter.name(), "Cutter-07");
        assert_eq!(cutter.kind(), ToolKind::Cutter);
        assert!(cutter.is_operational());
    }
}
