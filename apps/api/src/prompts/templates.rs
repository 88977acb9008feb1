// Fixed prompt text for every task kind.
// Placeholders are `{field}` names declared by `TaskKind::fields`; nothing
// else in these strings may use braces.

pub const BUG_ANALYSIS_SYSTEM: &str = "Eres un experto en debugging y resolución de problemas.";

/// Replace: {error_message}, {code_snippet}
pub const BUG_ANALYSIS_TEMPLATE: &str = r#"Analiza el siguiente error y código. Proporciona:

1. 🔍 Causa del error
2. 💡 Solución paso a paso
3. 🛠️ Código corregido
4. 🚀 Mejoras adicionales
5. 📚 Recursos de aprendizaje

Error: {error_message}

Código:
{code_snippet}

Sé específico y educativo en las explicaciones."#;

pub const PERFORMANCE_SYSTEM: &str =
    "Eres un experto en optimización de algoritmos y performance.";

/// Replace: {code}
pub const PERFORMANCE_TEMPLATE: &str = r#"Analiza este código y sugiere optimizaciones específicas:

🎯 Análisis de Performance:
- Complejidad temporal actual
- Bottlenecks identificados
- Uso de memoria
- Algoritmos más eficientes

📈 Optimizaciones:
- Versión optimizada del código
- Explicación de mejoras
- Benchmarks esperados

Código:
{code}"#;

pub const CODE_GENERATION_SYSTEM: &str = "Eres un desarrollador experto. \
    Genera código limpio, bien documentado y siguiendo mejores prácticas \
    en el lenguaje indicado.";

/// Replace: {language}, {prompt}
pub const CODE_GENERATION_TEMPLATE: &str = r#"Lenguaje: {language}

{prompt}"#;

pub const CODE_REVIEW_SYSTEM: &str = "Eres un senior developer experto en code review.";

/// Replace: {language}, {code}
pub const CODE_REVIEW_TEMPLATE: &str = r#"Realiza un code review detallado del siguiente código {language}.
Analiza:

1. 🛡️ Seguridad: Vulnerabilidades potenciales
2. 🎯 Performance: Optimizaciones posibles
3. 📖 Legibilidad: Claridad del código
4. 🏗️ Arquitectura: Patrones y estructuras
5. 🧪 Testing: Cobertura y casos edge
6. 📏 Estándares: PEP 8, mejores prácticas

Código:
{code}

Proporciona sugerencias específicas y ejemplos de mejora."#;

pub const TEST_GENERATION_SYSTEM: &str = "Eres un experto en testing de software con Python.";

/// Replace: {framework}, {code}
pub const TEST_GENERATION_TEMPLATE: &str = r#"Genera un archivo de tests en {framework} para el siguiente código Python.
Incluye:
- Casos básicos
- Casos edge
- Pruebas negativas
- Comentarios sobre cobertura

Código:
{code}"#;

pub const DOCSTRING_SYSTEM: &str = "Eres un experto en documentación de código Python.";

/// Replace: {function_code}
pub const DOCSTRING_TEMPLATE: &str = r#"Analiza la siguiente función Python y genera un docstring completo
en formato Google Style que incluya:
- Descripción breve y detallada
- Parámetros con tipos
- Valor de retorno
- Excepciones que puede lanzar
- Ejemplo de uso

Función:
{function_code}"#;

pub const README_SYSTEM: &str = "Eres un experto en documentación técnica.";

/// Replace: {project_info}
pub const README_TEMPLATE: &str = r#"Crea un README.md profesional para el siguiente proyecto:
{project_info}

Incluye:
- Título y descripción
- Instalación
- Uso básico
- API Reference
- Contribuciones
- Licencia

Usa formato Markdown con badges y estructura profesional."#;
