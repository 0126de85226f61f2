//! PDF implementation of the certificate renderer.
//!
//! Draws an A4 certificate: issuer header, permit number badge, holder and
//! premises data, validity dates, legal notes, a digital-signature box with
//! the printed verification code, and the verification QR in the lower
//! left corner. The QR is drawn as filled vector modules so the document
//! stays resolution-independent.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rect, Rgb,
};
use qrcode::{EcLevel, QrCode};

use afap_core::config::certificate::CertificateConfig;
use afap_core::error::AppError;
use afap_core::result::AppResult;
use afap_entity::certificate::CertificateData;

use crate::code::{verification_code, verification_url};
use crate::renderer::CertificateRenderer;

/// Renders AFAP certificates as PDF documents.
#[derive(Debug, Clone)]
pub struct PdfCertificateRenderer {
    issuer_name: String,
    issuer_department: String,
}

impl PdfCertificateRenderer {
    /// Create a renderer with the configured issuer header lines.
    pub fn new(config: &CertificateConfig) -> Self {
        Self {
            issuer_name: config.issuer_name.clone(),
            issuer_department: config.issuer_department.clone(),
        }
    }
}

impl CertificateRenderer for PdfCertificateRenderer {
    fn render(
        &self,
        data: &CertificateData,
        base_url: &str,
        rendered_at: DateTime<Utc>,
    ) -> AppResult<Bytes> {
        // A4 portrait.
        let page_width = 210.0;
        let page_height = 297.0;
        let margin = 20.0;

        let (doc, page, layer) = PdfDocument::new(
            format!("AFAP N° {}", data.numero_afap),
            Mm(page_width),
            Mm(page_height),
            "Certificado",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::internal(format!("Failed to load certificate font: {e}")))?;
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::internal(format!("Failed to load certificate font: {e}")))?;

        let slate = Color::Rgb(Rgb::new(0.06, 0.09, 0.16, None));
        let blue = Color::Rgb(Rgb::new(0.15, 0.39, 0.92, None));
        let emerald = Color::Rgb(Rgb::new(0.06, 0.73, 0.51, None));
        let grey = Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None));
        let black = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));
        let white = Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None));

        // Issuer header
        layer.set_fill_color(slate.clone());
        layer.use_text(
            self.issuer_name.as_str(),
            20.0,
            Mm(margin),
            Mm(page_height - 18.0),
            &bold,
        );
        layer.use_text(
            self.issuer_department.as_str(),
            12.0,
            Mm(margin),
            Mm(page_height - 25.0),
            &regular,
        );

        layer.set_outline_color(blue.clone());
        layer.set_outline_thickness(2.0);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(margin), Mm(page_height - 30.0)), false),
                (
                    Point::new(Mm(page_width - margin), Mm(page_height - 30.0)),
                    false,
                ),
            ],
            is_closed: false,
        });

        // Certificate title
        layer.set_fill_color(blue.clone());
        layer.use_text(
            "AUTORIZACIÓN DE FUNCIONAMIENTO",
            17.0,
            Mm(margin),
            Mm(page_height - 42.0),
            &bold,
        );
        layer.use_text(
            "AUTOMÁTICO PRECARIA (AFAP)",
            17.0,
            Mm(margin),
            Mm(page_height - 49.0),
            &bold,
        );

        // Permit number badge
        layer.add_rect(
            Rect::new(
                Mm(margin),
                Mm(page_height - 62.0),
                Mm(margin + 60.0),
                Mm(page_height - 54.0),
            )
            .with_mode(PaintMode::Fill),
        );
        layer.set_fill_color(white);
        layer.use_text(
            format!("N° {}", data.numero_afap),
            14.0,
            Mm(margin + 5.0),
            Mm(page_height - 60.0),
            &bold,
        );
        layer.set_fill_color(emerald.clone());
        layer.use_text(
            "APROBADO",
            10.0,
            Mm(margin + 65.0),
            Mm(page_height - 60.0),
            &bold,
        );

        // Holder and premises data
        let field = |label: &str, value: &str, y| {
            layer.set_fill_color(black.clone());
            layer.use_text(label, 11.0, Mm(margin), Mm(y), &bold);
            layer.use_text(value, 11.0, Mm(margin + 48.0), Mm(y), &regular);
        };

        let mut y = page_height - 78.0;
        field("TITULAR:", &data.titular_nombre, y);
        y -= 7.0;
        field("CUIT/CUIL:", &data.titular_cuit, y);
        y -= 7.0;
        field("DOMICILIO:", &data.domicilio, y);
        y -= 7.0;
        field("LOCALIDAD:", &data.localidad, y);
        y -= 7.0;
        field("RUBRO:", &data.rubro, y);
        y -= 7.0;
        field("ACTIVIDAD:", &data.actividad, y);
        y -= 7.0;
        field("SUPERFICIE:", &format!("{} m²", data.metros_cuadrados), y);
        y -= 10.0;
        field(
            "FECHA DE EMISIÓN:",
            &data.fecha_emision.format("%d/%m/%Y").to_string(),
            y,
        );
        y -= 7.0;
        field(
            "FECHA DE VENCIMIENTO:",
            &data.fecha_vencimiento.format("%d/%m/%Y").to_string(),
            y,
        );

        // Legal notes
        y -= 12.0;
        layer.set_fill_color(black.clone());
        layer.use_text("IMPORTANTE:", 10.0, Mm(margin), Mm(y), &bold);
        y -= 6.0;
        for linea in [
            "• Esta autorización tiene carácter PRECARIO y validez de 30 días corridos.",
            "• Permite el inicio de actividades mientras se tramita la habilitación definitiva.",
            "• No exime del cumplimiento de las normativas municipales vigentes.",
            "• Debe exhibirse en lugar visible del establecimiento.",
            "• La municipalidad se reserva el derecho de realizar inspecciones.",
        ] {
            layer.use_text(linea, 9.0, Mm(margin), Mm(y), &regular);
            y -= 5.0;
        }

        // Digital signature box with the printed verification code
        let box_top = y - 6.0;
        let box_left = page_width - margin - 70.0;
        let box_right = page_width - margin;
        let box_bottom = box_top - 28.0;
        layer.set_outline_color(black.clone());
        layer.set_outline_thickness(1.0);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(box_left), Mm(box_bottom)), false),
                (Point::new(Mm(box_right), Mm(box_bottom)), false),
                (Point::new(Mm(box_right), Mm(box_top)), false),
                (Point::new(Mm(box_left), Mm(box_top)), false),
            ],
            is_closed: true,
        });
        layer.set_fill_color(blue);
        layer.use_text(
            "FIRMADO DIGITALMENTE",
            8.0,
            Mm(box_left + 8.0),
            Mm(box_top - 7.0),
            &bold,
        );
        layer.set_fill_color(black.clone());
        layer.use_text(
            self.issuer_department.as_str(),
            9.0,
            Mm(box_left + 8.0),
            Mm(box_top - 14.0),
            &regular,
        );
        layer.set_fill_color(grey.clone());
        layer.use_text(
            format!(
                "Código: {}",
                verification_code(data.numero_afap, rendered_at)
            ),
            7.0,
            Mm(box_left + 8.0),
            Mm(box_top - 23.0),
            &regular,
        );

        // Verification QR, lower-left corner
        let url = verification_url(base_url, data.permit_id);
        let qr = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
            .map_err(|e| AppError::internal(format!("Failed to build verification QR: {e}")))?;
        let qr_width = qr.width();
        let colors = qr.to_colors();
        let module = 0.8;
        let qr_top = 20.0 + 0.8 * 33.0;

        layer.set_fill_color(black.clone());
        let mut row_y = qr_top;
        for row in colors.chunks(qr_width) {
            let mut col_x = margin;
            for color in row {
                if *color == qrcode::Color::Dark {
                    layer.add_rect(
                        Rect::new(Mm(col_x), Mm(row_y - module), Mm(col_x + module), Mm(row_y))
                            .with_mode(PaintMode::Fill),
                    );
                }
                col_x += module;
            }
            row_y -= module;
        }

        layer.use_text("Escanear para verificar", 9.0, Mm(margin), Mm(16.0), &bold);
        layer.set_fill_color(grey.clone());
        layer.use_text(
            format!("AFAP-{}", data.numero_afap),
            7.0,
            Mm(margin),
            Mm(12.0),
            &regular,
        );

        // Footer
        layer.use_text(
            format!(
                "Generado el {} hs",
                rendered_at.format("%d/%m/%Y a las %H:%M:%S")
            ),
            8.0,
            Mm(page_width / 2.0 - 30.0),
            Mm(8.0),
            &regular,
        );
        layer.set_fill_color(emerald);
        layer.use_text("DOCUMENTO VÁLIDO", 7.0, Mm(margin), Mm(5.0), &bold);
        layer.set_fill_color(grey);
        layer.use_text(
            "Página 1 de 1",
            7.0,
            Mm(page_width - margin - 20.0),
            Mm(5.0),
            &regular,
        );

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| AppError::internal(format!("Failed to serialize certificate: {e}")))?;
        Ok(Bytes::from(bytes))
    }
}
