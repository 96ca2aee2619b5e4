//! Financial visualization components for Bevy

use bevy::prelude::*;
use std::collections::HashMap;
use crate::domain::{
    budget::Budget,
    savings_goal::SavingsGoal,
};

/// Build a budget vs actual comparison chart
#[cfg(feature = "visualization")]
pub fn build_budget_chart(
    budget: &Budget,
    actual: &HashMap<String, f64>
) -> Vec<u8> {
    // Use default theme for financial visualizations
    // In a real implementation, this would use plotters to generate a chart
    
    // Placeholder implementation - in a real implementation this would generate
    // a chart using plotters and return the image data
    vec![]
}

/// Build a 3D progress ring visualization for savings goals
#[cfg(feature = "visualization")]
pub fn build_savings_progress_ring(
    goal: &SavingsGoal,
) -> impl Fn(&mut Commands) {
    move |commands: &mut Commands| {
        // Calculate progress as a value between 0.0 and 1.0
        let progress = if goal.target_amount.is_zero() {
            0.0
        } else {
            (goal.current_amount.amount / goal.target_amount.amount).to_f64().unwrap_or(0.0) as f32
        };
        
        // Create a 3D progress ring using Bevy's 3D primitives
        commands.spawn(PbrBundle {
            mesh: meshes.add(Mesh::from(shape::Torus {
                radius: 1.0,
                ring_radius: 0.2,
                subdivisions: 64,
            })),
            material: materials.add(StandardMaterial {
                base_color: Color::rgba(0.2, 0.6, 1.0, progress * 0.8 + 0.2), // Blue with alpha based on progress
                ..default()
            }),
            transform: Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ..default()
        });
    }
}

/// Bevy plugin for financial visualizations
pub struct FinancialVisualizationPlugin;

impl Plugin for FinancialVisualizationPlugin {
    fn build(&self, app: &mut App) {
        // Add systems for financial visualization
        app.add_systems(Update, update_financial_visualizations);
    }
}

/// System to update financial visualizations
fn update_financial_visualizations() {
    // In a real implementation, this would update visualizations based on financial data
}