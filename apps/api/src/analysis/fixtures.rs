//! Shared test fixtures.

/// A structured output that satisfies the exam analysis schema.
/// Includes single-value ranges (`max: null`) and a null laboratory range.
pub const SAMPLE_ANALYSIS_JSON: &str = r#"{
  "date": "2024-05-02",
  "parameters": [
    {
      "name": "Glucosa en ayunas",
      "unit": "mg/dL",
      "currentRange": {"min": 92.0, "max": null},
      "laboratoryRange": {"min": 70.0, "max": 100.0},
      "optimalRange": {"min": 75.0, "max": 86.0},
      "valuation": "Dentro del rango del laboratorio pero sobre el óptimo"
    },
    {
      "name": "Vitamina D",
      "unit": "ng/mL",
      "currentRange": {"min": 24.0, "max": null},
      "laboratoryRange": null,
      "optimalRange": {"min": 50.0, "max": 80.0},
      "valuation": "Insuficiente"
    },
    {
      "name": "Ferritina",
      "unit": "ng/mL",
      "currentRange": {"min": 45.0, "max": null},
      "laboratoryRange": {"min": 30.0, "max": 400.0},
      "optimalRange": {"min": 70.0, "max": null},
      "valuation": "Bajo el valor óptimo de corte"
    }
  ],
  "analysis": [
    "La glucosa en ayunas está sobre el rango óptimo, lo que sugiere menor sensibilidad a la insulina.",
    "La vitamina D es insuficiente y puede afectar la función inmune y ósea.",
    "La ferritina está bajo el óptimo, compatible con reservas de hierro reducidas."
  ],
  "nutritionalRecommendations": [
    "🐟 Come pescado 2 veces por semana",
    "🥦 Aumenta el consumo de verduras crucíferas"
  ],
  "exerciseRecommendations": [
    "🏋️ Entrena fuerza 3 veces por semana",
    "Camina 30 min"
  ],
  "sleepRecommendations": [
    "●Dormir 8 horas"
  ],
  "supplementRecommendations": [
    "💊 Vitamina D3 4000 UI diarias junto con K2"
  ]
}"#;
