use anyhow::Context;
use clap::{Parser, ValueEnum};
use directions::{
    DirectionsError, InstructionEnricher, NarrationAssembler, PlannedTrip, SystemClock, TripRequest,
    TripTipGenerator, VehicleMode,
    config::Config,
    display_narration_line, display_tip, display_trip_header, display_trip_summary,
    graphhopper::GraphHopper,
    interactive::prompt_trip_request,
    llm::{GeminiRewriter, TextRewriteService},
    logging::init_logging,
    narration::count_sharp_turns,
    plan_trip,
    tts::{
        AudioFormat, TtsBackend, Voice, clip_path, execute_tts_output,
        google_tts::GoogleTts, spoken_step, spoken_tip, spoken_trip_intro,
        translate_tts::TranslateTts,
    },
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Narrate a trip turn by turn, with sharp-turn warnings and a smart tip", long_about = None)]
struct Args {
    /// Starting location (prompted for when omitted)
    #[arg(value_name = "START")]
    start: Option<String>,

    /// Destination (prompted for when omitted)
    #[arg(value_name = "DESTINATION")]
    destination: Option<String>,

    /// Mode of transport
    #[arg(short, long, value_enum)]
    mode: Option<VehicleMode>,

    /// Stop along the way; repeat for several stops in order
    #[arg(long = "via", value_name = "PLACE")]
    via: Vec<String>,

    /// Skip the language model even when GEMINI_API_KEY is set
    #[arg(long)]
    no_ai: bool,

    /// Speak each step aloud
    #[arg(short, long)]
    speak: bool,

    /// Save one audio clip per step into this directory instead of playing them
    #[arg(long, value_name = "DIR")]
    save_audio: Option<PathBuf>,

    /// Speech engine
    #[arg(short, long, value_enum, default_value = "translate")]
    engine: Engine,

    /// Voice to use for speech
    #[arg(short, long, value_enum, default_value = "default")]
    voice: Voice,

    /// Audio format for saved clips
    #[arg(short = 'a', long, value_enum, default_value = "mp3")]
    audio_format: AudioFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Engine {
    /// Google Translate voice, no key needed (MP3 only)
    Translate,
    /// Google Cloud TTS (needs GOOGLE_CLOUD_API_KEY)
    Google,
}

fn speech_backend(args: &Args, config: &Config) -> anyhow::Result<Option<Box<dyn TtsBackend>>> {
    if !args.speak && args.save_audio.is_none() {
        return Ok(None);
    }

    let backend: Box<dyn TtsBackend> = match args.engine {
        Engine::Translate => Box::new(TranslateTts::new(args.voice)?),
        Engine::Google => {
            let api_key = config.google_cloud_api_key.clone().context(
                "GOOGLE_CLOUD_API_KEY environment variable not set. Please set your Google Cloud TTS API key: export GOOGLE_CLOUD_API_KEY=your_api_key_here",
            )?;
            Box::new(GoogleTts::new(api_key, args.voice.into())?)
        }
    };
    log::info!("Speech engine: {}", backend.backend_name());
    Ok(Some(backend))
}

fn rewriter(args: &Args, config: &Config) -> anyhow::Result<Option<GeminiRewriter>> {
    if args.no_ai {
        return Ok(None);
    }
    match &config.gemini_api_key {
        Some(key) => {
            let gemini = GeminiRewriter::new(key.clone(), config.gemini_model.clone())?;
            log::info!("Language model: {} ({})", gemini.backend_name(), gemini.model());
            Ok(Some(gemini))
        }
        None => {
            println!("ℹ️ GEMINI_API_KEY not set: natural-language steps and smart tips are off.\n");
            Ok(None)
        }
    }
}

/// Speaks or saves narration, giving up on speech after the first failure so
/// a missing audio device does not flood the output.
struct Speaker<'a> {
    backend: Option<&'a dyn TtsBackend>,
    save_dir: Option<&'a Path>,
    format: AudioFormat,
    clips: usize,
}

impl Speaker<'_> {
    fn say(&mut self, text: &str) {
        let Some(backend) = self.backend else {
            return;
        };

        let path = self.save_dir.map(|dir| clip_path(dir, self.clips, &self.format));
        self.clips += 1;

        if let Err(e) = execute_tts_output(backend, text, path.as_deref(), &self.format) {
            eprintln!("⚠️ Speech disabled: {}", e);
            self.backend = None;
        }
    }
}

fn next_request(args: &Args, first: bool) -> anyhow::Result<Option<TripRequest>> {
    if let (Some(start), Some(destination)) = (&args.start, &args.destination) {
        if !first {
            return Ok(None);
        }
        return Ok(Some(TripRequest {
            vehicle_mode: args.mode.unwrap_or_default(),
            start: start.clone(),
            destination: destination.clone(),
            waypoints: args.via.clone(),
        }));
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let request = prompt_trip_request(&mut input, &mut output, args.mode, args.via.is_empty())?;
    Ok(request.map(|mut r| {
        if r.waypoints.is_empty() {
            r.waypoints = args.via.clone();
        }
        r
    }))
}

fn narrate(
    trip: &PlannedTrip,
    service: Option<&dyn TextRewriteService>,
    speaker: &mut Speaker<'_>,
) {
    let context = &trip.context;
    let assembler = NarrationAssembler::new(InstructionEnricher::new(service));
    let lines = assembler.assemble(&trip.route, context.vehicle_mode);

    println!();
    display_trip_header(context);
    match count_sharp_turns(&lines) {
        0 => {}
        1 => println!("⚠️ 1 sharp turn on this route"),
        n => println!("⚠️ {} sharp turns on this route", n),
    }
    speaker.say(&spoken_trip_intro(context));

    for line in &lines {
        display_narration_line(line);
        speaker.say(&spoken_step(line));
    }

    display_trip_summary(context);

    let clock = SystemClock;
    let tip = TripTipGenerator::new(service, &clock).generate_tip(context);
    display_tip(&tip);
    speaker.say(&spoken_tip(&tip));
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let graphhopper = GraphHopper::new(config.graphhopper_api_key.clone())?;
    let gemini = rewriter(&args, &config)?;
    let backend = speech_backend(&args, &config)?;

    if let Some(dir) = &args.save_audio {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut speaker = Speaker {
        backend: backend.as_deref(),
        save_dir: args.save_audio.as_deref(),
        format: args.audio_format,
        clips: 0,
    };
    let service = gemini.as_ref().map(|g| g as &dyn TextRewriteService);
    let one_shot = args.start.is_some() && args.destination.is_some();

    let mut first = true;
    loop {
        let Some(request) = next_request(&args, first)? else {
            return Err(DirectionsError::NoTripEntered.into());
        };
        first = false;

        match plan_trip(&graphhopper, &request) {
            Ok(trip) => {
                narrate(&trip, service, &mut speaker);
                return Ok(());
            }
            Err(e) if e.is_retryable() && !one_shot => {
                println!("*************************************************");
                println!("{}", e);
                println!("*************************************************");
                println!("Please enter valid locations again.\n");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
